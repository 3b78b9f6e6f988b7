//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform does not provide the requested capability
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// Reading or writing the history scroll-restoration flag failed
    #[error("Scroll restoration flag unavailable: {0}")]
    ScrollRestoration(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
