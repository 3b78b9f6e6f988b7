//! Fragment targets

use std::cell::RefCell;
use std::rc::Rc;

use scrollkeep_platform::{Document, ScrollPosition, ScrollSurface};

/// An element that can be addressed by a URL fragment
struct Anchor {
    id: Option<String>,
    name: Option<String>,
    /// Surface that scrolls to reveal the anchor
    surface: Rc<dyn ScrollSurface>,
    /// Offset of `surface` at which the anchor is in view
    position: ScrollPosition,
}

/// A document holding named anchors
#[derive(Default)]
pub struct HeadlessDocument {
    anchors: RefCell<Vec<Anchor>>,
    revealed: RefCell<Vec<String>>,
}

impl HeadlessDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element with an `id`
    pub fn add_anchor(
        &self,
        id: impl Into<String>,
        surface: Rc<dyn ScrollSurface>,
        position: ScrollPosition,
    ) {
        self.anchors.borrow_mut().push(Anchor {
            id: Some(id.into()),
            name: None,
            surface,
            position,
        });
    }

    /// Add an element addressable only through its `name` attribute
    pub fn add_named_anchor(
        &self,
        name: impl Into<String>,
        surface: Rc<dyn ScrollSurface>,
        position: ScrollPosition,
    ) {
        self.anchors.borrow_mut().push(Anchor {
            id: None,
            name: Some(name.into()),
            surface,
            position,
        });
    }

    /// Fragments that were successfully scrolled into view, in order
    pub fn revealed(&self) -> Vec<String> {
        self.revealed.borrow().clone()
    }

    fn find(&self, fragment: &str) -> Option<(Rc<dyn ScrollSurface>, ScrollPosition)> {
        let anchors = self.anchors.borrow();
        anchors
            .iter()
            .find(|anchor| anchor.id.as_deref() == Some(fragment))
            .or_else(|| {
                anchors
                    .iter()
                    .find(|anchor| anchor.name.as_deref() == Some(fragment))
            })
            .map(|anchor| (anchor.surface.clone(), anchor.position))
    }
}

impl Document for HeadlessDocument {
    fn scroll_fragment_into_view(&self, fragment: &str) -> bool {
        let Some((surface, position)) = self.find(fragment) else {
            return false;
        };

        self.revealed.borrow_mut().push(fragment.to_string());
        surface.scroll_to(position);
        true
    }
}
