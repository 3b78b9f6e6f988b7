//! Error types for scrollkeep_core

use thiserror::Error;

/// Error returned by a scroll decision callback
///
/// This is how a callback signals that it could not make a decision; the
/// failure is propagated to whoever triggered the resolution and is never
/// retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DecisionError(String);

impl DecisionError {
    /// Create a decision error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The error message
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur in the scroll engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrollError {
    /// An element is already registered under this key
    #[error("ScrollBehavior: There is already an element registered for `{0}`.")]
    DuplicateKey(String),

    /// No element is registered under this key
    #[error("ScrollBehavior: There is no element registered for `{0}`.")]
    UnknownKey(String),

    /// A decision callback failed
    #[error("Scroll decision for {surface} failed: {source}")]
    Decision {
        /// `window` or `element `key``
        surface: String,
        /// The callback's error
        source: DecisionError,
    },

    /// Invalid configuration
    #[error("Invalid scroll behavior config: {0}")]
    Config(String),
}

impl ScrollError {
    pub(crate) fn decision(surface: Option<&str>, source: DecisionError) -> Self {
        let surface = match surface {
            Some(key) => format!("element `{key}`"),
            None => "window".to_string(),
        };
        ScrollError::Decision { surface, source }
    }
}

/// Result type for scrollkeep_core operations
pub type Result<T> = std::result::Result<T, ScrollError>;
