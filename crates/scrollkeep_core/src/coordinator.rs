//! Navigation and lifecycle coordination
//!
//! Reacts to the two signals that can invalidate saved positions: a
//! navigation about to happen, and the page being frozen, discarded or torn
//! down.

use std::rc::Rc;

use scrollkeep_platform::{NavigationEvent, PageLifecycleState};

use crate::behavior::{AttachedListeners, Inner};

impl<C: 'static> Inner<C> {
    /// Attach the window, navigation and lifecycle listeners
    pub(crate) fn attach_listeners(self: &Rc<Self>) -> AttachedListeners {
        // Every window scroll is observed rather than only navigations, since
        // some platforms move the window before announcing the navigation.
        let weak = Rc::downgrade(self);
        let window = self.window.add_scroll_listener(Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_window_scroll();
            }
        }));

        let weak = Rc::downgrade(self);
        let navigation = self
            .navigation
            .add_navigation_listener(Rc::new(move |event: &NavigationEvent| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_navigation(event);
                }
            }));

        let weak = Rc::downgrade(self);
        let lifecycle = self
            .lifecycle
            .add_state_listener(Rc::new(move |state: PageLifecycleState| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_lifecycle(state);
                }
            }));

        AttachedListeners {
            window,
            navigation,
            lifecycle,
        }
    }

    /// A navigation is about to replace the current location
    pub(crate) fn handle_navigation(&self, event: &NavigationEvent) {
        tracing::debug!(action = %event.action, "navigation");
        self.capture_before_navigation();
    }

    /// Drop the pending window capture and save every element now
    ///
    /// Element offsets are still those of the page being left. The window's
    /// may not be: on `POP` the platform can move it before announcing the
    /// navigation, so the window is never captured here.
    pub(crate) fn capture_before_navigation(&self) {
        self.cancel_window_save();

        let ignoring = self.ignore_scroll_events.get();
        let keys = self.elements.borrow().keys();
        for key in keys {
            self.cancel_element_save(&key);
            if !ignoring {
                self.capture_element_position(&key);
            }
        }
    }

    /// The page lifecycle changed
    pub(crate) fn handle_lifecycle(&self, state: PageLifecycleState) {
        tracing::debug!(%state, "page lifecycle");

        if state.is_suspended() {
            self.capture_before_navigation();
            if !self.ignore_scroll_events.get() {
                self.capture_window_position();
            }

            // The flag survives reloads; hand it back so the platform can
            // restore server-rendered pages on its own.
            self.restoration.release(&*self.history);
        } else if self.config.manage_scroll_restoration {
            self.restoration.acquire(&*self.history);
        }
    }
}
