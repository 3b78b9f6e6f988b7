//! Frame scheduling

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a scheduled frame callback
    pub struct FrameHandle;
}

/// A callback deferred to the next frame boundary
pub type FrameCallback = Box<dyn FnOnce()>;

/// Deferred, cancellable callbacks
///
/// Implementations wrap `requestAnimationFrame`-style primitives (or a manual
/// pump in headless environments). All callbacks run on the same thread that
/// scheduled them.
pub trait FrameScheduler {
    /// Run `callback` after the next frame has been produced
    ///
    /// Implementations must never invoke the callback synchronously from
    /// inside this call.
    fn after_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a scheduled callback
    ///
    /// A cancelled callback never runs. Cancelling a handle that already ran
    /// or was already cancelled is a no-op.
    fn cancel(&self, handle: FrameHandle);
}
