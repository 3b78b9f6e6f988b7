//! Router-facing types: locations and navigation events

use std::fmt;
use std::rc::Rc;

use crate::surface::ListenerId;

/// How a location was reached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavigationAction {
    /// A new entry was pushed onto the history stack
    Push,
    /// The current entry was replaced
    Replace,
    /// The user moved through existing history (back/forward)
    Pop,
}

impl fmt::Display for NavigationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationAction::Push => f.write_str("PUSH"),
            NavigationAction::Replace => f.write_str("REPLACE"),
            NavigationAction::Pop => f.write_str("POP"),
        }
    }
}

/// An opaque navigation descriptor supplied by the router
///
/// The engine never mutates locations; it only reads the action, the hash
/// and the storage key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// How this location was reached
    pub action: NavigationAction,
    /// Router-assigned history entry key, unique per entry
    pub key: Option<String>,
    /// Path portion of the URL
    pub pathname: String,
    /// Query string, including the leading `?` when present
    pub search: String,
    /// Fragment, including the leading `#` when present
    pub hash: Option<String>,
}

impl Location {
    /// Create a location with no key, query or fragment
    pub fn new(action: NavigationAction, pathname: impl Into<String>) -> Self {
        Self {
            action,
            key: None,
            pathname: pathname.into(),
            search: String::new(),
            hash: None,
        }
    }

    /// Set the history entry key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the query string
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the fragment
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Key under which positions for this location are stored
    ///
    /// The history entry key when the router supplies one, otherwise the
    /// path and query.
    pub fn storage_key(&self) -> String {
        match &self.key {
            Some(key) => key.clone(),
            None => format!("{}{}", self.pathname, self.search),
        }
    }
}

/// Delivered to navigation listeners before the location changes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationEvent {
    /// The kind of navigation about to happen
    pub action: NavigationAction,
    /// The destination, when the router knows it up front
    pub location: Option<Location>,
}

impl NavigationEvent {
    /// Create an event for the given action
    pub fn new(action: NavigationAction) -> Self {
        Self {
            action,
            location: None,
        }
    }

    /// Attach the destination
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// Callback invoked on every navigation
pub type NavigationListener = Rc<dyn Fn(&NavigationEvent)>;

/// Source of navigation events (the router)
pub trait NavigationSource {
    /// Attach a navigation listener
    fn add_navigation_listener(&self, listener: NavigationListener) -> ListenerId;

    /// Detach a navigation listener. Unknown ids are ignored.
    fn remove_navigation_listener(&self, id: ListenerId);
}

/// Access to the router's current location
pub trait LocationProvider {
    /// The location currently being displayed
    fn current_location(&self) -> Location;
}
