//! Scrollkeep Headless Platform
//!
//! Deterministic, single-threaded implementation of the `scrollkeep_platform`
//! traits. Nothing happens on its own: frames are pumped explicitly, scroll
//! events are emitted explicitly, and lifecycle transitions and navigations
//! are driven by the caller. This makes it suitable for server-side execution
//! and for reproducing the timing races the engine has to survive.
//!
//! # Example
//!
//! ```ignore
//! use scrollkeep_platform::prelude::*;
//! use scrollkeep_platform_headless::HeadlessPlatform;
//!
//! let platform = HeadlessPlatform::new();
//! platform.window.set_extent(ScrollPosition::new(0.0, 4000.0));
//!
//! // ... hand `platform` to the engine ...
//!
//! platform.window.user_scroll(ScrollPosition::new(0.0, 300.0));
//! platform.frames.run_until_idle(16);
//! ```

pub mod document;
pub mod frames;
pub mod history;
pub mod lifecycle;
pub mod router;
pub mod surface;

pub use document::HeadlessDocument;
pub use frames::HeadlessFrames;
pub use history::HeadlessHistory;
pub use lifecycle::HeadlessLifecycle;
pub use router::HeadlessRouter;
pub use surface::HeadlessSurface;

use std::rc::Rc;

use scrollkeep_platform::{Document, FrameScheduler, History, PageLifecycle, ScrollPlatform, ScrollSurface};

/// Headless platform implementation
///
/// All collaborators are exposed as public fields so tests and embedders can
/// drive them directly.
#[derive(Clone)]
pub struct HeadlessPlatform {
    /// The window surface
    pub window: Rc<HeadlessSurface>,
    /// Fragment targets
    pub document: Rc<HeadlessDocument>,
    /// Manual frame pump
    pub frames: Rc<HeadlessFrames>,
    /// Scroll-restoration flag
    pub history: Rc<HeadlessHistory>,
    /// Lifecycle signal source
    pub lifecycle: Rc<HeadlessLifecycle>,
}

impl HeadlessPlatform {
    /// Create a platform with an unbounded window and manual restoration support
    pub fn new() -> Self {
        Self {
            window: Rc::new(HeadlessSurface::new()),
            document: Rc::new(HeadlessDocument::new()),
            frames: Rc::new(HeadlessFrames::new()),
            history: Rc::new(HeadlessHistory::new()),
            lifecycle: Rc::new(HeadlessLifecycle::new()),
        }
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollPlatform for HeadlessPlatform {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn window(&self) -> Rc<dyn ScrollSurface> {
        self.window.clone()
    }

    fn document(&self) -> Rc<dyn Document> {
        self.document.clone()
    }

    fn frames(&self) -> Rc<dyn FrameScheduler> {
        self.frames.clone()
    }

    fn history(&self) -> Rc<dyn History> {
        self.history.clone()
    }

    fn lifecycle(&self) -> Rc<dyn PageLifecycle> {
        self.lifecycle.clone()
    }
}
