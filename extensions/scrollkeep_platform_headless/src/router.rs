//! In-memory router with a history stack

use std::cell::{Cell, RefCell};

use scrollkeep_platform::{
    ListenerId, Location, LocationProvider, NavigationAction, NavigationEvent, NavigationListener,
    NavigationSource,
};
use slotmap::SlotMap;

/// Router over an in-memory history stack
///
/// Every navigation notifies listeners first and only then changes the
/// current location, the same order browser routers use: listeners observe
/// the page they are leaving.
pub struct HeadlessRouter {
    entries: RefCell<Vec<Location>>,
    index: Cell<usize>,
    next_key: Cell<u64>,
    listeners: RefCell<SlotMap<ListenerId, NavigationListener>>,
}

impl HeadlessRouter {
    /// Create a router whose first entry is `pathname`, reached by a `POP`
    /// (the initial page load)
    pub fn new(pathname: &str) -> Self {
        let initial = Location::new(NavigationAction::Pop, pathname).with_key("k0");
        Self {
            entries: RefCell::new(vec![initial]),
            index: Cell::new(0),
            next_key: Cell::new(1),
            listeners: RefCell::new(SlotMap::with_key()),
        }
    }

    /// Push a new entry, discarding any forward entries
    pub fn push(&self, pathname: &str, hash: Option<&str>) -> Location {
        let location = self.fresh_location(NavigationAction::Push, pathname, hash);
        self.notify(&location);

        let mut entries = self.entries.borrow_mut();
        let index = self.index.get() + 1;
        entries.truncate(index);
        entries.push(location.clone());
        self.index.set(index);
        location
    }

    /// Replace the current entry
    pub fn replace(&self, pathname: &str, hash: Option<&str>) -> Location {
        let location = self.fresh_location(NavigationAction::Replace, pathname, hash);
        self.notify(&location);

        self.entries.borrow_mut()[self.index.get()] = location.clone();
        location
    }

    /// Move back one entry. Returns `None` at the start of history.
    pub fn back(&self) -> Option<Location> {
        let index = self.index.get().checked_sub(1)?;
        Some(self.go_to(index))
    }

    /// Move forward one entry. Returns `None` at the end of history.
    pub fn forward(&self) -> Option<Location> {
        let index = self.index.get() + 1;
        if index >= self.entries.borrow().len() {
            return None;
        }
        Some(self.go_to(index))
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn go_to(&self, index: usize) -> Location {
        let mut location = self.entries.borrow()[index].clone();
        location.action = NavigationAction::Pop;
        self.notify(&location);

        self.entries.borrow_mut()[index] = location.clone();
        self.index.set(index);
        location
    }

    fn fresh_location(&self, action: NavigationAction, pathname: &str, hash: Option<&str>) -> Location {
        let key = self.next_key.get();
        self.next_key.set(key + 1);

        let location = Location::new(action, pathname).with_key(format!("k{key}"));
        match hash {
            Some(hash) => location.with_hash(hash),
            None => location,
        }
    }

    fn notify(&self, location: &Location) {
        tracing::debug!(action = %location.action, pathname = %location.pathname, "headless navigation");
        let event = NavigationEvent::new(location.action).with_location(location.clone());
        let listeners: Vec<NavigationListener> = self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(&event);
        }
    }
}

impl NavigationSource for HeadlessRouter {
    fn add_navigation_listener(&self, listener: NavigationListener) -> ListenerId {
        self.listeners.borrow_mut().insert(listener)
    }

    fn remove_navigation_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(id);
    }
}

impl LocationProvider for HeadlessRouter {
    fn current_location(&self) -> Location {
        self.entries.borrow()[self.index.get()].clone()
    }
}
