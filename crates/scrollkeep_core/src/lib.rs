//! Scrollkeep Core
//!
//! Scroll position restoration for client-side navigations:
//!
//! - **Target Resolution**: Decide where each surface should land after a navigation
//! - **Window Controller**: Re-apply window targets until the platform stops fighting back
//! - **Element Registry**: Save and restore independently scrollable elements
//! - **Coordination**: Capture positions before navigations and page suspension
//!
//! Positions are saved per history entry and restored on `POP` and `REPLACE`
//! navigations. `PUSH` navigations land on the location's fragment or at the
//! top of the page.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//!
//! use scrollkeep_core::prelude::*;
//! use scrollkeep_platform_headless::{HeadlessPlatform, HeadlessRouter};
//!
//! let platform = HeadlessPlatform::new();
//! let router = Rc::new(HeadlessRouter::new("/"));
//! let store = Rc::new(MemoryPositionStore::new());
//!
//! let behavior = ScrollBehavior::<()>::builder(&platform, router.clone(), router.clone(), store)
//!     .config(ScrollBehaviorConfig::standard())
//!     .build()?;
//!
//! router.push("/docs", Some("#install"));
//! let completion = behavior.update_scroll(None, &())?;
//! platform.frames.run_until_idle(16);
//! pollster::block_on(completion);
//! ```

pub mod behavior;
pub mod completion;
pub mod config;
pub mod error;
pub mod restoration;
pub mod store;
pub mod target;

mod coordinator;
mod registry;
mod window;

#[cfg(test)]
mod tests;

pub use behavior::{ScrollBehavior, ScrollBehaviorBuilder};
pub use completion::ScrollCompletion;
pub use config::ScrollBehaviorConfig;
pub use error::{DecisionError, Result, ScrollError};
pub use restoration::ScrollRestorationGuard;
pub use store::MemoryPositionStore;
pub use target::{
    decision_fn, default_scroll_target, saved_scroll_target, DecisionFn, ScrollDecision,
    ScrollTarget, TargetResolver,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::behavior::{ScrollBehavior, ScrollBehaviorBuilder};
    pub use crate::completion::ScrollCompletion;
    pub use crate::config::ScrollBehaviorConfig;
    pub use crate::error::{DecisionError, Result, ScrollError};
    pub use crate::store::MemoryPositionStore;
    pub use crate::target::{decision_fn, DecisionFn, ScrollDecision, ScrollTarget};

    pub use scrollkeep_platform::prelude::*;
}
