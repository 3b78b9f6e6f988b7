//! Fragment lookup

/// The document hosting fragment targets
pub trait Document {
    /// Bring the element addressed by `fragment` into view
    ///
    /// The element is looked up by id first, then by its `name` attribute.
    /// Returns `false` when nothing matches, in which case nothing scrolled.
    fn scroll_fragment_into_view(&self, fragment: &str) -> bool;
}
