//! Native scroll-restoration flag management
//!
//! While the engine runs, the platform's own restoration has to be switched
//! to manual or it fights the engine on `POP` navigations. The flag is
//! process-wide, so the guard only ever restores a value it captured itself.

use std::cell::Cell;

use scrollkeep_platform::{History, ScrollRestoration};

/// Acquire/release guard around the platform's scroll-restoration flag
#[derive(Debug, Default)]
pub struct ScrollRestorationGuard {
    /// Value found before switching to manual; `None` while not acquired
    saved: Cell<Option<ScrollRestoration>>,
}

impl ScrollRestorationGuard {
    /// Create a guard that has not acquired the flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this guard currently holds the flag
    pub fn is_acquired(&self) -> bool {
        self.saved.get().is_some()
    }

    /// The value that will be restored on release
    pub fn saved(&self) -> Option<ScrollRestoration> {
        self.saved.get()
    }

    /// Switch the flag to manual, remembering the previous value
    ///
    /// A no-op when already acquired or when the platform does not support
    /// manual restoration. Failures leave the guard released.
    pub fn acquire(&self, history: &dyn History) {
        if self.is_acquired() || !history.supports_scroll_restoration() {
            return;
        }

        let previous = match history.scroll_restoration() {
            Ok(previous) => previous,
            Err(err) => {
                tracing::warn!("Failed to read scroll restoration: {}", err);
                return;
            }
        };

        match history.set_scroll_restoration(ScrollRestoration::Manual) {
            Ok(()) => {
                tracing::debug!(%previous, "scroll restoration set to manual");
                self.saved.set(Some(previous));
            }
            Err(err) => tracing::warn!("Failed to set scroll restoration: {}", err),
        }
    }

    /// Put back the value captured by [`acquire`](Self::acquire)
    ///
    /// Errors are ignored; the guard is released either way.
    pub fn release(&self, history: &dyn History) {
        let Some(previous) = self.saved.take() else {
            return;
        };

        match history.set_scroll_restoration(previous) {
            Ok(()) => tracing::debug!(%previous, "scroll restoration restored"),
            Err(err) => tracing::debug!("Ignoring scroll restoration reset failure: {}", err),
        }
    }
}
