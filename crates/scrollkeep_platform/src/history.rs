//! History scroll-restoration flag

use std::fmt;

use crate::error::Result;

/// Value of the platform's native scroll-restoration flag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollRestoration {
    /// The platform restores scroll positions itself
    #[default]
    Auto,
    /// The application is responsible for scroll positions
    Manual,
}

impl fmt::Display for ScrollRestoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollRestoration::Auto => f.write_str("auto"),
            ScrollRestoration::Manual => f.write_str("manual"),
        }
    }
}

/// Access to the session history's scroll-restoration flag
///
/// The flag is process-wide state that survives reloads.
pub trait History {
    /// Whether the engine may switch restoration to manual
    ///
    /// Returns `false` when the flag does not exist, or when the platform is
    /// known to misbehave with manual restoration (some mobile browsers freeze
    /// after history swipe gestures in that mode).
    fn supports_scroll_restoration(&self) -> bool;

    /// Read the current flag value
    fn scroll_restoration(&self) -> Result<ScrollRestoration>;

    /// Overwrite the flag value
    fn set_scroll_restoration(&self, value: ScrollRestoration) -> Result<()>;
}
