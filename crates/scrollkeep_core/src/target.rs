//! Scroll target resolution
//!
//! Turns a decision callback's answer plus saved and location-derived state
//! into the concrete target a surface should scroll to. Resolution is pure
//! apart from the store and location reads; it never touches a surface.
//!
//! The precedence is:
//!
//! 1. An explicit position or fragment from the callback wins outright.
//! 2. A callback answering `false` skips the surface.
//! 3. Otherwise the saved position is used, except on `PUSH` navigations,
//!    which always land on a new logical page.
//! 4. Otherwise the location's fragment, or the origin.

use std::fmt;
use std::rc::Rc;

use scrollkeep_platform::{Location, LocationProvider, NavigationAction, PositionStore, ScrollPosition};

use crate::error::{DecisionError, Result, ScrollError};

/// A decision callback's answer
#[derive(Clone, Debug, PartialEq)]
pub enum ScrollDecision {
    /// Leave the surface untouched
    Skip,
    /// Use the saved position, falling back to the location default
    UseDefault,
    /// Scroll to these offsets
    Position(ScrollPosition),
    /// Scroll the element with this id or name into view
    Fragment(String),
}

impl From<bool> for ScrollDecision {
    fn from(value: bool) -> Self {
        if value {
            ScrollDecision::UseDefault
        } else {
            ScrollDecision::Skip
        }
    }
}

impl From<ScrollPosition> for ScrollDecision {
    fn from(position: ScrollPosition) -> Self {
        ScrollDecision::Position(position)
    }
}

impl From<(f32, f32)> for ScrollDecision {
    fn from(position: (f32, f32)) -> Self {
        ScrollDecision::Position(position.into())
    }
}

impl From<&str> for ScrollDecision {
    fn from(fragment: &str) -> Self {
        fragment.to_string().into()
    }
}

impl From<String> for ScrollDecision {
    fn from(fragment: String) -> Self {
        // An empty fragment carries no target.
        if fragment.is_empty() {
            ScrollDecision::Skip
        } else {
            ScrollDecision::Fragment(fragment)
        }
    }
}

/// Where a surface should end up
#[derive(Clone, Debug, PartialEq)]
pub enum ScrollTarget {
    /// Absolute offsets
    Position(ScrollPosition),
    /// Element id or name to bring into view
    Fragment(String),
}

impl ScrollTarget {
    /// The offsets, for position targets
    pub fn position(&self) -> Option<ScrollPosition> {
        match self {
            ScrollTarget::Position(position) => Some(*position),
            ScrollTarget::Fragment(_) => None,
        }
    }
}

impl From<ScrollPosition> for ScrollTarget {
    fn from(position: ScrollPosition) -> Self {
        ScrollTarget::Position(position)
    }
}

impl fmt::Display for ScrollTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollTarget::Position(position) => write!(f, "{position}"),
            ScrollTarget::Fragment(fragment) => write!(f, "#{fragment}"),
        }
    }
}

/// Decision callback: `(previous context, next context) -> decision`
///
/// The previous context is absent when an element is resolved at
/// registration time.
pub type DecisionFn<C> = Rc<dyn Fn(Option<&C>, &C) -> std::result::Result<ScrollDecision, DecisionError>>;

/// Wrap an infallible callback returning anything convertible to a decision
///
/// ```ignore
/// let skip_modals = decision_fn(|_prev, next: &RouteContext| !next.is_modal);
/// ```
pub fn decision_fn<C, F, D>(callback: F) -> DecisionFn<C>
where
    C: 'static,
    F: Fn(Option<&C>, &C) -> D + 'static,
    D: Into<ScrollDecision>,
{
    Rc::new(
        move |prev: Option<&C>, next: &C| -> std::result::Result<ScrollDecision, DecisionError> {
            Ok(callback(prev, next).into())
        },
    )
}

/// Resolves scroll targets against a position store and the current location
#[derive(Clone, Copy)]
pub struct TargetResolver<'a> {
    storage: &'a dyn PositionStore,
    location: &'a dyn LocationProvider,
}

impl<'a> TargetResolver<'a> {
    /// Create a resolver
    pub fn new(storage: &'a dyn PositionStore, location: &'a dyn LocationProvider) -> Self {
        Self { storage, location }
    }

    /// Resolve the target for one surface
    ///
    /// `key` is `None` for the window. Returns `Ok(None)` when the surface
    /// must be left alone. A failing callback is reported as
    /// [`ScrollError::Decision`].
    pub fn resolve<C>(
        &self,
        key: Option<&str>,
        decision: Option<&DecisionFn<C>>,
        prev: Option<&C>,
        next: &C,
    ) -> Result<Option<ScrollTarget>> {
        let decision = match decision {
            Some(callback) => callback(prev, next).map_err(|err| ScrollError::decision(key, err))?,
            None => ScrollDecision::UseDefault,
        };

        let target = match decision {
            ScrollDecision::Skip => None,
            ScrollDecision::Position(position) => Some(ScrollTarget::Position(position)),
            ScrollDecision::Fragment(fragment) if fragment.is_empty() => None,
            ScrollDecision::Fragment(fragment) => Some(ScrollTarget::Fragment(fragment)),
            ScrollDecision::UseDefault => {
                let location = self.location.current_location();
                let target = saved_scroll_target(self.storage, &location, key)
                    .map(ScrollTarget::Position)
                    .unwrap_or_else(|| default_scroll_target(&location));
                Some(target)
            }
        };

        tracing::trace!(
            surface = key.unwrap_or("window"),
            target = ?target,
            "resolved scroll target"
        );
        Ok(target)
    }
}

/// The saved position for a surface, if restoring applies to this location
///
/// `PUSH` navigations never restore: they always land on a new logical page.
pub fn saved_scroll_target(
    storage: &dyn PositionStore,
    location: &Location,
    key: Option<&str>,
) -> Option<ScrollPosition> {
    if location.action == NavigationAction::Push {
        return None;
    }
    storage.read(location, key)
}

/// The target implied by the location alone
///
/// The fragment when the hash names one, otherwise the origin. An empty hash
/// or a lone `#` names nothing.
pub fn default_scroll_target(location: &Location) -> ScrollTarget {
    match location.hash.as_deref() {
        Some(hash) if !hash.is_empty() && hash != "#" => {
            let fragment = hash.strip_prefix('#').unwrap_or(hash);
            ScrollTarget::Fragment(fragment.to_string())
        }
        _ => ScrollTarget::Position(ScrollPosition::ORIGIN),
    }
}
