//! In-memory scroll surface

use std::cell::{Cell, RefCell};

use scrollkeep_platform::{ListenerId, ScrollListener, ScrollPosition, ScrollSurface};
use slotmap::SlotMap;

/// A scroll surface backed by plain memory
///
/// Models the two ways real surfaces misbehave: offsets are clamped to the
/// scrollable extent (content shorter than a saved offset), and scroll
/// commands can be silently dropped (window scrolling racing browser chrome).
#[derive(Default)]
pub struct HeadlessSurface {
    offset: Cell<ScrollPosition>,
    /// Maximum reachable offsets; `None` means unbounded
    extent: Cell<Option<ScrollPosition>>,
    /// Number of upcoming `scroll_to` calls to ignore
    dropped_commands: Cell<u32>,
    /// Emit a scroll event synchronously from `scroll_to`
    emit_on_scroll_to: Cell<bool>,
    listeners: RefCell<SlotMap<ListenerId, ScrollListener>>,
    commands: RefCell<Vec<ScrollPosition>>,
}

impl HeadlessSurface {
    /// Create an unbounded surface at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface whose offsets cannot exceed `extent`
    pub fn with_extent(extent: ScrollPosition) -> Self {
        let surface = Self::new();
        surface.set_extent(extent);
        surface
    }

    /// Limit the reachable offsets
    pub fn set_extent(&self, extent: ScrollPosition) {
        self.extent.set(Some(extent));
        self.offset.set(self.clamp(self.offset.get()));
    }

    /// Ignore the next `count` programmatic scroll commands
    pub fn drop_next_scroll_commands(&self, count: u32) {
        self.dropped_commands.set(count);
    }

    /// Emit a scroll event from inside every applied `scroll_to`
    pub fn set_emit_on_scroll_to(&self, emit: bool) {
        self.emit_on_scroll_to.set(emit);
    }

    /// Simulate the user scrolling: move and emit a scroll event
    pub fn user_scroll(&self, position: ScrollPosition) {
        self.offset.set(self.clamp(position));
        self.emit_scroll();
    }

    /// Move without emitting, as a platform adjusting the offset behind the
    /// application's back would
    pub fn set_offset_silently(&self, position: ScrollPosition) {
        self.offset.set(self.clamp(position));
    }

    /// Notify every attached listener
    pub fn emit_scroll(&self) {
        let listeners: Vec<ScrollListener> = self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener();
        }
    }

    /// Every programmatic scroll command received, applied or not
    pub fn scroll_commands(&self) -> Vec<ScrollPosition> {
        self.commands.borrow().clone()
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn clamp(&self, position: ScrollPosition) -> ScrollPosition {
        let position = ScrollPosition::new(position.x.max(0.0), position.y.max(0.0));
        match self.extent.get() {
            Some(extent) => {
                ScrollPosition::new(position.x.min(extent.x), position.y.min(extent.y))
            }
            None => position,
        }
    }
}

impl ScrollSurface for HeadlessSurface {
    fn scroll_offset(&self) -> ScrollPosition {
        self.offset.get()
    }

    fn scroll_to(&self, position: ScrollPosition) {
        self.commands.borrow_mut().push(position);

        let dropped = self.dropped_commands.get();
        if dropped > 0 {
            self.dropped_commands.set(dropped - 1);
            tracing::trace!(%position, "headless surface dropped scroll command");
            return;
        }

        self.offset.set(self.clamp(position));
        if self.emit_on_scroll_to.get() {
            self.emit_scroll();
        }
    }

    fn add_scroll_listener(&self, listener: ScrollListener) -> ListenerId {
        self.listeners.borrow_mut().insert(listener)
    }

    fn remove_scroll_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(id);
    }
}
