//! The scroll behavior engine
//!
//! [`ScrollBehavior`] ties the pieces together: it owns the window controller
//! state, the element registry and the restoration guard, and listens to the
//! platform for window scrolls, navigations and lifecycle changes.
//!
//! All callbacks handed to the platform hold a weak reference to the engine,
//! so dropping the engine is enough to make every pending callback inert.
//! No `RefCell` borrow is ever held across a call into the platform or into a
//! decision callback; both may re-enter the engine.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use scrollkeep_platform::{
    Document, FrameScheduler, History, ListenerId, LocationProvider, NavigationSource,
    PageLifecycle, PositionStore, ScrollPlatform, ScrollPosition, ScrollSurface,
};

use crate::completion::ScrollCompletion;
use crate::config::ScrollBehaviorConfig;
use crate::error::{Result, ScrollError};
use crate::registry::{ElementScrollRegistry, ScrollElement};
use crate::restoration::ScrollRestorationGuard;
use crate::target::{DecisionFn, ScrollTarget, TargetResolver};
use crate::window::WindowScrollState;

/// Apply a target to a surface in a single attempt
///
/// Fragments are brought into view by the document; a fragment that names
/// nothing scrolls the surface to the origin instead.
pub(crate) fn apply_scroll_target(
    document: &dyn Document,
    surface: &dyn ScrollSurface,
    target: &ScrollTarget,
) {
    let position = match target {
        ScrollTarget::Fragment(fragment) => {
            if document.scroll_fragment_into_view(fragment) {
                return;
            }
            tracing::trace!(fragment = %fragment, "fragment not found, scrolling to origin");
            ScrollPosition::ORIGIN
        }
        ScrollTarget::Position(position) => *position,
    };
    surface.scroll_to(position);
}

/// Platform listeners attached while the engine runs
#[derive(Clone, Copy, Debug)]
pub(crate) struct AttachedListeners {
    pub(crate) window: ListenerId,
    pub(crate) navigation: ListenerId,
    pub(crate) lifecycle: ListenerId,
}

/// Shared engine state
pub(crate) struct Inner<C: 'static> {
    pub(crate) config: ScrollBehaviorConfig,
    pub(crate) platform_name: &'static str,
    pub(crate) window: Rc<dyn ScrollSurface>,
    pub(crate) document: Rc<dyn Document>,
    pub(crate) frames: Rc<dyn FrameScheduler>,
    pub(crate) history: Rc<dyn History>,
    pub(crate) lifecycle: Rc<dyn PageLifecycle>,
    pub(crate) navigation: Rc<dyn NavigationSource>,
    pub(crate) location: Rc<dyn LocationProvider>,
    pub(crate) storage: Rc<dyn PositionStore>,
    /// Window decision callback
    pub(crate) should_update_scroll: Option<DecisionFn<C>>,
    pub(crate) restoration: ScrollRestorationGuard,
    pub(crate) window_state: RefCell<WindowScrollState>,
    pub(crate) elements: RefCell<ElementScrollRegistry<C>>,
    pub(crate) ignore_scroll_events: Cell<bool>,
    /// `None` once stopped
    pub(crate) listeners: Cell<Option<AttachedListeners>>,
}

impl<C: 'static> Inner<C> {
    pub(crate) fn resolver(&self) -> TargetResolver<'_> {
        TargetResolver::new(&*self.storage, &*self.location)
    }

    fn stop(&self) {
        if let Some(listeners) = self.listeners.take() {
            self.restoration.release(&*self.history);

            self.window.remove_scroll_listener(listeners.window);
            self.navigation.remove_navigation_listener(listeners.navigation);
            self.lifecycle.remove_state_listener(listeners.lifecycle);

            // Pending ticks still run, see nothing to do and resolve.
            self.window_state.borrow_mut().cancel();
            self.cancel_window_save();

            tracing::debug!(platform = self.platform_name, "scroll behavior stopped");
        }

        let elements = self.elements.borrow_mut().drain();
        for (key, element) in elements {
            self.detach_element(&key, element);
        }
    }

    pub(crate) fn detach_element(&self, key: &str, element: ScrollElement<C>) {
        element.surface.remove_scroll_listener(element.listener);
        if let Some(handle) = element.save_handle {
            self.frames.cancel(handle);
        }
        tracing::debug!(key, "scroll element unregistered");
    }
}

/// Builder for [`ScrollBehavior`]
pub struct ScrollBehaviorBuilder<C: 'static> {
    platform_name: &'static str,
    window: Rc<dyn ScrollSurface>,
    document: Rc<dyn Document>,
    frames: Rc<dyn FrameScheduler>,
    history: Rc<dyn History>,
    lifecycle: Rc<dyn PageLifecycle>,
    navigation: Rc<dyn NavigationSource>,
    location: Rc<dyn LocationProvider>,
    storage: Rc<dyn PositionStore>,
    should_update_scroll: Option<DecisionFn<C>>,
    config: ScrollBehaviorConfig,
}

impl<C: 'static> ScrollBehaviorBuilder<C> {
    /// Decision callback for the window
    pub fn should_update_scroll(mut self, decision: DecisionFn<C>) -> Self {
        self.should_update_scroll = Some(decision);
        self
    }

    /// Engine configuration
    pub fn config(mut self, config: ScrollBehaviorConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration, take over the platform and start listening
    pub fn build(self) -> Result<ScrollBehavior<C>> {
        self.config.validate()?;

        let inner = Rc::new(Inner {
            config: self.config,
            platform_name: self.platform_name,
            window: self.window,
            document: self.document,
            frames: self.frames,
            history: self.history,
            lifecycle: self.lifecycle,
            navigation: self.navigation,
            location: self.location,
            storage: self.storage,
            should_update_scroll: self.should_update_scroll,
            restoration: ScrollRestorationGuard::new(),
            window_state: RefCell::new(WindowScrollState::new()),
            elements: RefCell::new(ElementScrollRegistry::new()),
            ignore_scroll_events: Cell::new(false),
            listeners: Cell::new(None),
        });

        // Keeps the platform from fighting the engine on `POP` navigations.
        if inner.config.manage_scroll_restoration {
            inner.restoration.acquire(&*inner.history);
        }

        let listeners = inner.attach_listeners();
        inner.listeners.set(Some(listeners));

        tracing::debug!(
            platform = inner.platform_name,
            max_attempts = inner.config.max_window_scroll_attempts,
            "scroll behavior started"
        );
        Ok(ScrollBehavior { inner })
    }
}

/// Scroll position management across client-side navigations
///
/// `C` is the embedder's navigation context, handed to decision callbacks.
///
/// ```ignore
/// let behavior = ScrollBehavior::builder(&platform, router.clone(), router.clone(), store)
///     .should_update_scroll(decision_fn(|_prev, next: &Route| !next.is_modal))
///     .build()?;
///
/// // After every transition has rendered:
/// let completion = behavior.update_scroll(Some(&prev_route), &route)?;
/// completion.await;
/// ```
pub struct ScrollBehavior<C: 'static> {
    inner: Rc<Inner<C>>,
}

impl<C: 'static> ScrollBehavior<C> {
    /// Start building an engine
    ///
    /// The window, document, frame scheduler, history flag and lifecycle
    /// source come from `platform`; navigation signals, the current location
    /// and position storage are supplied separately since they belong to the
    /// embedder's router.
    pub fn builder(
        platform: &dyn ScrollPlatform,
        navigation: Rc<dyn NavigationSource>,
        location: Rc<dyn LocationProvider>,
        storage: Rc<dyn PositionStore>,
    ) -> ScrollBehaviorBuilder<C> {
        ScrollBehaviorBuilder {
            platform_name: platform.name(),
            window: platform.window(),
            document: platform.document(),
            frames: platform.frames(),
            history: platform.history(),
            lifecycle: platform.lifecycle(),
            navigation,
            location,
            storage,
            should_update_scroll: None,
            config: ScrollBehaviorConfig::default(),
        }
    }

    /// Register a scrollable element under `key`
    ///
    /// Schedules an initial capture and immediately applies the element's
    /// target for `context`. If resolving that target fails the registration
    /// is rolled back and the error returned.
    pub fn register_element(
        &self,
        key: impl Into<String>,
        surface: Rc<dyn ScrollSurface>,
        should_update_scroll: Option<DecisionFn<C>>,
        context: &C,
    ) -> Result<()> {
        let key = key.into();
        if self.inner.elements.borrow().contains(&key) {
            return Err(ScrollError::DuplicateKey(key));
        }

        let weak = Rc::downgrade(&self.inner);
        let listener_key = key.clone();
        let listener = surface.add_scroll_listener(Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.save_element_position(&listener_key);
            }
        }));

        let element = ScrollElement::new(surface.clone(), should_update_scroll, listener);
        let inserted = self.inner.elements.borrow_mut().insert(key.clone(), element);
        if let Err(err) = inserted {
            surface.remove_scroll_listener(listener);
            return Err(err);
        }
        tracing::debug!(key = %key, "scroll element registered");

        // In case no scrolling occurs, save the initial position.
        self.inner.save_element_position(&key);

        if let Err(err) = self.inner.update_element_scroll(&key, None, context) {
            let removed = self.inner.elements.borrow_mut().remove(&key);
            if let Ok(element) = removed {
                self.inner.detach_element(&key, element);
            }
            return Err(err);
        }
        Ok(())
    }

    /// Unregister the element under `key`
    pub fn unregister_element(&self, key: &str) -> Result<()> {
        let element = self.inner.elements.borrow_mut().remove(key)?;
        self.inner.detach_element(key, element);
        Ok(())
    }

    /// Restore scroll positions after a navigation has rendered
    ///
    /// Starts a fresh window retry loop, superseding any running one, and
    /// applies every registered element's target. The returned completion
    /// resolves when the window loop terminates.
    pub fn update_scroll(&self, prev: Option<&C>, next: &C) -> Result<ScrollCompletion> {
        let completion = self.inner.update_window_scroll(prev, next)?;

        let keys = self.inner.elements.borrow().keys();
        for key in keys {
            self.inner.update_element_scroll(&key, prev, next)?;
        }
        Ok(completion)
    }

    /// Detach from the platform and restore the native scroll-restoration flag
    ///
    /// Every registered element is unregistered. Calling `stop` again does
    /// nothing; dropping the engine stops it.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Whether [`stop`](Self::stop) has been called
    pub fn is_stopped(&self) -> bool {
        self.inner.listeners.get().is_none()
    }

    /// Stop saving positions and detecting reached targets
    pub fn start_ignoring_scroll_events(&self) {
        self.inner.ignore_scroll_events.set(true);
    }

    /// Resume saving positions and detecting reached targets
    pub fn stop_ignoring_scroll_events(&self) {
        self.inner.ignore_scroll_events.set(false);
    }

    /// Whether scroll events are currently ignored
    pub fn is_ignoring_scroll_events(&self) -> bool {
        self.inner.ignore_scroll_events.get()
    }

    /// Apply `target` to `surface` once, the way the engine does
    pub fn scroll_to_target(&self, surface: &dyn ScrollSurface, target: &ScrollTarget) {
        apply_scroll_target(&*self.inner.document, surface, target);
    }

    /// The platform's window surface
    pub fn window(&self) -> Rc<dyn ScrollSurface> {
        self.inner.window.clone()
    }

    /// Whether an element is registered under `key`
    pub fn is_registered(&self, key: &str) -> bool {
        self.inner.elements.borrow().contains(key)
    }

    /// Registered keys, in registration order
    pub fn registered_keys(&self) -> Vec<String> {
        self.inner.elements.borrow().keys()
    }

    /// The active configuration
    pub fn config(&self) -> &ScrollBehaviorConfig {
        &self.inner.config
    }
}

impl<C: 'static> Drop for ScrollBehavior<C> {
    fn drop(&mut self) {
        self.inner.stop();
    }
}
