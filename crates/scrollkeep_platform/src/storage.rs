//! Saved scroll positions

use crate::navigation::Location;
use crate::surface::ScrollPosition;

/// Keyed store of saved scroll positions
///
/// Positions are keyed by `(location, surface)`, where the surface key is
/// `None` for the window and the registration key for elements. Writes are
/// last-write-wins; there is no versioning.
pub trait PositionStore {
    /// Record the position of a surface at a location
    fn save(&self, location: &Location, key: Option<&str>, position: ScrollPosition);

    /// Look up the last recorded position, if any
    fn read(&self, location: &Location, key: Option<&str>) -> Option<ScrollPosition>;
}
