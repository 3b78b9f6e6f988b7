//! Scrollable surfaces and scroll positions

use std::fmt;
use std::rc::Rc;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a listener attached to a surface, router or lifecycle source
    pub struct ListenerId;
}

/// Callback invoked whenever a surface reports a scroll
pub type ScrollListener = Rc<dyn Fn()>;

/// A pair of scroll offsets in CSS pixels
///
/// Offsets are compared exactly; the engine never applies a tolerance band.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollPosition {
    /// Horizontal offset
    pub x: f32,
    /// Vertical offset
    pub y: f32,
}

impl ScrollPosition {
    /// The top-left corner
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new position
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for ScrollPosition {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<ScrollPosition> for (f32, f32) {
    fn from(position: ScrollPosition) -> Self {
        (position.x, position.y)
    }
}

impl fmt::Display for ScrollPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A scrollable surface: the window or a scroll container element
///
/// Surfaces are shared between the embedder and the engine, so every method
/// takes `&self`.
pub trait ScrollSurface {
    /// Current scroll offsets
    fn scroll_offset(&self) -> ScrollPosition;

    /// Jump to the given offsets without animation
    ///
    /// The platform may clamp the offsets or apply them late; callers that
    /// need convergence must check `scroll_offset()` afterwards.
    fn scroll_to(&self, position: ScrollPosition);

    /// Attach a scroll listener
    fn add_scroll_listener(&self, listener: ScrollListener) -> ListenerId;

    /// Detach a scroll listener. Unknown ids are ignored.
    fn remove_scroll_listener(&self, id: ListenerId);
}
