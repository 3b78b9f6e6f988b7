//! Scrollkeep Platform Abstraction Layer
//!
//! This crate provides platform-agnostic traits and types for everything the
//! scroll restoration engine talks to but does not own: scrollable surfaces,
//! frame scheduling, the history scroll-restoration flag, page lifecycle and
//! the router.
//!
//! # Architecture
//!
//! The abstraction is built around a handful of traits:
//!
//! - [`ScrollPlatform`] - The top-level platform bundle
//! - [`ScrollSurface`] - The window or a scrollable element
//! - [`FrameScheduler`] - Deferred, cancellable frame callbacks
//! - [`History`] - The native scroll-restoration flag
//! - [`PageLifecycle`] - Page suspension and termination signals
//! - [`NavigationSource`] / [`LocationProvider`] - The router
//! - [`PositionStore`] - Saved scroll positions
//!
//! # Platform Implementations
//!
//! - `scrollkeep_platform_headless` - Deterministic in-memory platform for
//!   server-side execution and tests
//!
//! # Example
//!
//! ```ignore
//! use scrollkeep_platform::prelude::*;
//!
//! fn restore(platform: &dyn ScrollPlatform, position: ScrollPosition) {
//!     let window = platform.window();
//!     platform.frames().after_frame(Box::new(move || {
//!         window.scroll_to(position);
//!     }));
//! }
//! ```

mod document;
mod error;
mod event;
mod frame;
mod history;
mod navigation;
mod platform;
mod storage;
mod surface;

// Re-export all public types
pub use document::Document;
pub use error::{PlatformError, Result};
pub use event::{LifecycleListener, PageLifecycle, PageLifecycleState};
pub use frame::{FrameCallback, FrameHandle, FrameScheduler};
pub use history::{History, ScrollRestoration};
pub use navigation::{
    Location, LocationProvider, NavigationAction, NavigationEvent, NavigationListener,
    NavigationSource,
};
pub use platform::ScrollPlatform;
pub use storage::PositionStore;
pub use surface::{ListenerId, ScrollListener, ScrollPosition, ScrollSurface};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::document::Document;
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{LifecycleListener, PageLifecycle, PageLifecycleState};
    pub use crate::frame::{FrameCallback, FrameHandle, FrameScheduler};
    pub use crate::history::{History, ScrollRestoration};
    pub use crate::navigation::{
        Location, LocationProvider, NavigationAction, NavigationEvent, NavigationListener,
        NavigationSource,
    };
    pub use crate::platform::ScrollPlatform;
    pub use crate::storage::PositionStore;
    pub use crate::surface::{ListenerId, ScrollListener, ScrollPosition, ScrollSurface};
}
