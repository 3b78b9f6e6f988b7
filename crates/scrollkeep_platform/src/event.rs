//! Page lifecycle events

use std::fmt;
use std::rc::Rc;

use crate::surface::ListenerId;

/// Callback invoked with the new state on every lifecycle transition
pub type LifecycleListener = Rc<dyn Fn(PageLifecycleState)>;

/// Source of page lifecycle transitions
///
/// Platform backends implement this on top of whatever visibility, freeze
/// and unload signals they have.
pub trait PageLifecycle {
    /// Attach a state-change listener
    fn add_state_listener(&self, listener: LifecycleListener) -> ListenerId;

    /// Detach a state-change listener. Unknown ids are ignored.
    fn remove_state_listener(&self, id: ListenerId);
}

/// Page lifecycle states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageLifecycleState {
    /// Visible and focused
    #[default]
    Active,
    /// Visible but not focused
    Passive,
    /// Not visible
    Hidden,
    /// Suspended by the platform; may be resumed or discarded
    Frozen,
    /// Being unloaded
    Terminated,
    /// Unloaded by the platform to reclaim resources
    Discarded,
}

impl PageLifecycleState {
    /// Whether the page is about to stop running code
    ///
    /// Scroll state must be flushed on these transitions because no further
    /// frames may be produced.
    pub fn is_suspended(self) -> bool {
        matches!(
            self,
            PageLifecycleState::Frozen
                | PageLifecycleState::Terminated
                | PageLifecycleState::Discarded
        )
    }
}

impl fmt::Display for PageLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageLifecycleState::Active => "active",
            PageLifecycleState::Passive => "passive",
            PageLifecycleState::Hidden => "hidden",
            PageLifecycleState::Frozen => "frozen",
            PageLifecycleState::Terminated => "terminated",
            PageLifecycleState::Discarded => "discarded",
        };
        f.write_str(name)
    }
}
