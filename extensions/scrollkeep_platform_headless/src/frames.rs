//! Manual frame pump

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use scrollkeep_platform::{FrameCallback, FrameHandle, FrameScheduler};
use slotmap::SlotMap;

/// Frame scheduler driven by explicit `run_frame` calls
///
/// Callbacks scheduled while a frame is running are deferred to the next
/// frame, matching how `requestAnimationFrame` callbacks registered during a
/// frame behave.
#[derive(Default)]
pub struct HeadlessFrames {
    callbacks: RefCell<SlotMap<FrameHandle, FrameCallback>>,
    /// Scheduling order; may contain handles that were cancelled
    order: RefCell<VecDeque<FrameHandle>>,
    frame: Cell<u64>,
}

impl HeadlessFrames {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames produced so far
    pub fn frame_count(&self) -> u64 {
        self.frame.get()
    }

    /// Number of callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.callbacks.borrow().len()
    }

    /// Whether a specific callback is still waiting
    pub fn is_scheduled(&self, handle: FrameHandle) -> bool {
        self.callbacks.borrow().contains_key(handle)
    }

    /// Produce one frame, running every callback scheduled before it started
    ///
    /// Returns the number of callbacks that ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.order.borrow_mut());
        self.frame.set(self.frame.get() + 1);

        let mut ran = 0;
        for handle in due {
            // Release the borrow before running: callbacks schedule more work.
            let callback = self.callbacks.borrow_mut().remove(handle);
            if let Some(callback) = callback {
                callback();
                ran += 1;
            }
        }

        tracing::trace!(frame = self.frame.get(), ran, "headless frame");
        ran
    }

    /// Produce frames until nothing is pending or `max_frames` is reached
    ///
    /// Returns the number of frames produced.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.pending() > 0 && frames < max_frames {
            self.run_frame();
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for HeadlessFrames {
    fn after_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = self.callbacks.borrow_mut().insert(callback);
        self.order.borrow_mut().push_back(handle);
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        self.callbacks.borrow_mut().remove(handle);
    }
}
