//! In-memory position store
//!
//! The engine only needs the [`PositionStore`] contract; this is the store
//! used when positions do not have to outlive the page, and by tests.
//!
//! # Example
//!
//! ```ignore
//! use scrollkeep_core::store::MemoryPositionStore;
//!
//! let store = MemoryPositionStore::new();
//! store.save(&location, None, ScrollPosition::new(0.0, 240.0));
//! assert_eq!(store.read(&location, None), Some(ScrollPosition::new(0.0, 240.0)));
//! ```

use std::cell::{Cell, RefCell};

use rustc_hash::FxHashMap;
use scrollkeep_platform::{Location, PositionStore, ScrollPosition};

/// `(location storage key, surface key)`; the window's surface key is `None`
type SlotKey = (String, Option<String>);

/// Position store backed by a hash map
///
/// Locations are keyed by [`Location::storage_key`], so two visits to the
/// same history entry share their saved positions.
#[derive(Default)]
pub struct MemoryPositionStore {
    positions: RefCell<FxHashMap<SlotKey, ScrollPosition>>,
    writes: Cell<u64>,
}

impl MemoryPositionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved positions
    pub fn len(&self) -> usize {
        self.positions.borrow().len()
    }

    /// Whether nothing has been saved
    pub fn is_empty(&self) -> bool {
        self.positions.borrow().is_empty()
    }

    /// Total number of saves, including overwrites
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }

    /// Forget every saved position
    pub fn clear(&self) {
        self.positions.borrow_mut().clear();
    }

    fn slot(location: &Location, key: Option<&str>) -> SlotKey {
        (location.storage_key(), key.map(str::to_string))
    }
}

impl PositionStore for MemoryPositionStore {
    fn save(&self, location: &Location, key: Option<&str>, position: ScrollPosition) {
        self.positions
            .borrow_mut()
            .insert(Self::slot(location, key), position);
        self.writes.set(self.writes.get() + 1);
    }

    fn read(&self, location: &Location, key: Option<&str>) -> Option<ScrollPosition> {
        self.positions
            .borrow()
            .get(&Self::slot(location, key))
            .copied()
    }
}
