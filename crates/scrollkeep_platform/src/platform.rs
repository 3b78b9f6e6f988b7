//! Platform trait and abstraction

use std::rc::Rc;

use crate::document::Document;
use crate::event::PageLifecycle;
use crate::frame::FrameScheduler;
use crate::history::History;
use crate::surface::ScrollSurface;

/// Platform abstraction trait
///
/// This trait is implemented by each platform backend to hand the engine the
/// browser-owned collaborators it drives. The router and the position store
/// are application concerns and are supplied separately.
pub trait ScrollPlatform {
    /// Get the platform name
    ///
    /// Returns a string like "web" or "headless".
    fn name(&self) -> &'static str;

    /// The window's scroll surface
    fn window(&self) -> Rc<dyn ScrollSurface>;

    /// The document used to resolve fragment targets
    fn document(&self) -> Rc<dyn Document>;

    /// Frame scheduler for deferred work
    fn frames(&self) -> Rc<dyn FrameScheduler>;

    /// Session history (scroll-restoration flag)
    fn history(&self) -> Rc<dyn History>;

    /// Page lifecycle signal source
    fn lifecycle(&self) -> Rc<dyn PageLifecycle>;
}
