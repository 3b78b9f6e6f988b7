//! Element scroll registry
//!
//! Registered elements are independently scrollable surfaces inside the page.
//! Scrolling an element is reliable, so unlike the window they get a single
//! application attempt per update and no convergence tracking.

use std::rc::Rc;

use indexmap::IndexMap;
use scrollkeep_platform::{FrameHandle, ListenerId, ScrollSurface};

use crate::behavior::{apply_scroll_target, Inner};
use crate::error::{Result, ScrollError};
use crate::target::DecisionFn;

/// A registered element surface
pub(crate) struct ScrollElement<C> {
    pub(crate) surface: Rc<dyn ScrollSurface>,
    pub(crate) should_update_scroll: Option<DecisionFn<C>>,
    /// Pending capture; at most one per element
    pub(crate) save_handle: Option<FrameHandle>,
    pub(crate) listener: ListenerId,
}

impl<C> ScrollElement<C> {
    pub(crate) fn new(
        surface: Rc<dyn ScrollSurface>,
        should_update_scroll: Option<DecisionFn<C>>,
        listener: ListenerId,
    ) -> Self {
        Self {
            surface,
            should_update_scroll,
            save_handle: None,
            listener,
        }
    }
}

/// Elements by key, in registration order
pub(crate) struct ElementScrollRegistry<C> {
    elements: IndexMap<String, ScrollElement<C>>,
}

impl<C> ElementScrollRegistry<C> {
    pub(crate) fn new() -> Self {
        Self {
            elements: IndexMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, key: String, element: ScrollElement<C>) -> Result<()> {
        if self.elements.contains_key(&key) {
            return Err(ScrollError::DuplicateKey(key));
        }
        self.elements.insert(key, element);
        Ok(())
    }

    pub(crate) fn remove(&mut self, key: &str) -> Result<ScrollElement<C>> {
        self.elements
            .shift_remove(key)
            .ok_or_else(|| ScrollError::UnknownKey(key.to_string()))
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&ScrollElement<C>> {
        self.elements.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut ScrollElement<C>> {
        self.elements.get_mut(key)
    }

    /// Snapshot of the keys, safe to iterate while the registry changes
    pub(crate) fn keys(&self) -> Vec<String> {
        self.elements.keys().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn drain(&mut self) -> Vec<(String, ScrollElement<C>)> {
        self.elements.drain(..).collect()
    }
}

impl<C: 'static> Inner<C> {
    /// Resolve and apply the target for one element
    ///
    /// Keys that are no longer registered are skipped.
    pub(crate) fn update_element_scroll(&self, key: &str, prev: Option<&C>, next: &C) -> Result<()> {
        let (surface, decision) = {
            let elements = self.elements.borrow();
            let Some(element) = elements.get(key) else {
                return Ok(());
            };
            (element.surface.clone(), element.should_update_scroll.clone())
        };

        let target = self
            .resolver()
            .resolve(Some(key), decision.as_ref(), prev, next)?;
        if let Some(target) = target {
            apply_scroll_target(&*self.document, &*surface, &target);
        }
        Ok(())
    }

    /// Schedule a capture for `key` unless one is pending or events are ignored
    pub(crate) fn save_element_position(self: &Rc<Self>, key: &str) {
        if self.ignore_scroll_events.get() {
            return;
        }
        let scheduled = match self.elements.borrow().get(key) {
            Some(element) => element.save_handle.is_some(),
            None => return,
        };
        if scheduled {
            return;
        }

        let weak = Rc::downgrade(self);
        let owned_key = key.to_string();
        let handle = self.frames.after_frame(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.capture_element_position(&owned_key);
            }
        }));

        if let Some(element) = self.elements.borrow_mut().get_mut(key) {
            element.save_handle = Some(handle);
        }
    }

    /// Drop a scheduled capture for `key`, if any
    pub(crate) fn cancel_element_save(&self, key: &str) {
        let handle = self
            .elements
            .borrow_mut()
            .get_mut(key)
            .and_then(|element| element.save_handle.take());
        if let Some(handle) = handle {
            self.frames.cancel(handle);
        }
    }

    /// Write the element's current offsets under the current location
    pub(crate) fn capture_element_position(&self, key: &str) {
        let surface = {
            let mut elements = self.elements.borrow_mut();
            let Some(element) = elements.get_mut(key) else {
                return;
            };
            element.save_handle = None;
            element.surface.clone()
        };

        let location = self.location.current_location();
        let position = surface.scroll_offset();
        tracing::trace!(key, location = %location.storage_key(), %position, "capturing element position");
        self.storage.save(&location, Some(key), position);
    }
}
