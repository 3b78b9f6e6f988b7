//! Page lifecycle driven by the caller

use std::cell::{Cell, RefCell};

use scrollkeep_platform::{LifecycleListener, ListenerId, PageLifecycle, PageLifecycleState};
use slotmap::SlotMap;

/// Lifecycle source whose transitions are triggered explicitly
#[derive(Default)]
pub struct HeadlessLifecycle {
    state: Cell<PageLifecycleState>,
    listeners: RefCell<SlotMap<ListenerId, LifecycleListener>>,
}

impl HeadlessLifecycle {
    /// Create a lifecycle in the `active` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> PageLifecycleState {
        self.state.get()
    }

    /// Move to `state` and notify listeners
    ///
    /// Transitions to the current state are ignored, as on real platforms.
    pub fn transition(&self, state: PageLifecycleState) {
        if self.state.get() == state {
            return;
        }
        tracing::debug!(from = %self.state.get(), to = %state, "headless lifecycle transition");
        self.state.set(state);

        let listeners: Vec<LifecycleListener> = self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(state);
        }
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl PageLifecycle for HeadlessLifecycle {
    fn add_state_listener(&self, listener: LifecycleListener) -> ListenerId {
        self.listeners.borrow_mut().insert(listener)
    }

    fn remove_state_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(id);
    }
}
