//! Engine configuration
//!
//! Configuration can be built in code or loaded from TOML:
//!
//! ```toml
//! max_window_scroll_attempts = 2
//! manage_scroll_restoration = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollError};

/// Configuration for a [`ScrollBehavior`](crate::ScrollBehavior)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollBehaviorConfig {
    /// Maximum number of scroll attempts per window target before giving up.
    /// Window scrolling is unreliable, so a target is re-applied on
    /// consecutive frames until it sticks or this budget runs out.
    #[serde(default = "default_max_window_scroll_attempts")]
    pub max_window_scroll_attempts: u32,
    /// Switch the platform's native scroll restoration to manual while the
    /// engine runs, restoring the original value on suspension and stop.
    #[serde(default = "default_manage_scroll_restoration")]
    pub manage_scroll_restoration: bool,
}

fn default_max_window_scroll_attempts() -> u32 {
    2
}

fn default_manage_scroll_restoration() -> bool {
    true
}

impl Default for ScrollBehaviorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScrollBehaviorConfig {
    /// Standard configuration for browser use.
    pub fn standard() -> Self {
        Self {
            max_window_scroll_attempts: default_max_window_scroll_attempts(),
            manage_scroll_restoration: default_manage_scroll_restoration(),
        }
    }

    /// Leave the native scroll-restoration flag alone.
    pub fn unmanaged() -> Self {
        Self {
            manage_scroll_restoration: false,
            ..Self::standard()
        }
    }

    /// Set the window attempt budget
    pub fn max_window_scroll_attempts(mut self, attempts: u32) -> Self {
        self.max_window_scroll_attempts = attempts;
        self
    }

    /// Set whether the native scroll-restoration flag is managed
    pub fn manage_scroll_restoration(mut self, manage: bool) -> Self {
        self.manage_scroll_restoration = manage;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|err| ScrollError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| ScrollError::Config(err.to_string()))
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.max_window_scroll_attempts == 0 {
            return Err(ScrollError::Config(
                "max_window_scroll_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
