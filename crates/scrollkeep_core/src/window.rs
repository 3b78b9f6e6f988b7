//! Window scroll controller
//!
//! Scrolling the window is unreliable: the platform may ignore or undo a
//! programmatic scroll while it is still settling after a navigation. A
//! resolved target is therefore re-applied once per frame until it sticks,
//! the attempt budget runs out, or a newer update supersedes it.
//!
//! Superseded loops are not torn down. Each loop is tagged with the
//! generation it was started in; a tick from an older generation still
//! resolves its completion but does nothing else.

use std::rc::Rc;

use scrollkeep_platform::{FrameHandle, ScrollPosition};

use crate::behavior::{apply_scroll_target, Inner};
use crate::completion::{completion_channel, CompletionSender, ScrollCompletion};
use crate::error::Result;
use crate::target::ScrollTarget;

/// What a retry tick should do when it fires
#[derive(Clone, Debug, PartialEq)]
pub enum TickStart {
    /// The loop was superseded or stopped
    Stale,
    /// Nothing left to apply
    Idle,
    /// Apply this target
    Apply(ScrollTarget),
}

/// What happens after an attempt was applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Superseded while the attempt was being applied
    Stale,
    /// Try again next frame
    Retry,
    /// The window reached the target
    Settled,
    /// Budget spent without observing the target
    Exhausted,
}

/// Mutable window state shared by the retry loop and the scroll listener
#[derive(Debug, Default)]
pub struct WindowScrollState {
    target: Option<ScrollTarget>,
    attempts: u32,
    generation: u64,
    save_handle: Option<FrameHandle>,
}

impl WindowScrollState {
    /// Create an idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Target of the running loop, if it has not settled
    pub fn target(&self) -> Option<&ScrollTarget> {
        self.target.as_ref()
    }

    /// Invalidate the running loop; its pending tick becomes stale
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.target = None;
    }

    /// Start a loop for `target`, invalidating any previous one
    ///
    /// Returns the new loop's generation.
    pub fn restart(&mut self, target: Option<ScrollTarget>) -> u64 {
        self.generation += 1;
        self.target = target;
        self.attempts = 0;
        self.generation
    }

    /// Decide what a tick from `generation` should do
    pub fn begin_tick(&self, generation: u64) -> TickStart {
        if generation != self.generation {
            return TickStart::Stale;
        }
        match &self.target {
            Some(target) => TickStart::Apply(target.clone()),
            None => TickStart::Idle,
        }
    }

    /// Count an applied attempt against a budget of `max_attempts`
    pub fn record_attempt(&mut self, generation: u64, max_attempts: u32) -> AttemptOutcome {
        if generation != self.generation {
            return AttemptOutcome::Stale;
        }
        // Cleared by the scroll listener while the attempt was applied
        if self.target.is_none() {
            return AttemptOutcome::Settled;
        }

        self.attempts += 1;
        if self.attempts >= max_attempts {
            self.target = None;
            return AttemptOutcome::Exhausted;
        }
        AttemptOutcome::Retry
    }

    /// Feed an observed window offset; returns true when it settles the loop
    ///
    /// Only position targets can be observed. Equality is exact.
    pub fn observe_offset(&mut self, offset: ScrollPosition) -> bool {
        let reached = self.target.as_ref().and_then(ScrollTarget::position) == Some(offset);
        if reached {
            self.target = None;
        }
        reached
    }

    /// Whether a window capture is scheduled
    pub fn save_scheduled(&self) -> bool {
        self.save_handle.is_some()
    }

    pub(crate) fn set_save_handle(&mut self, handle: FrameHandle) {
        self.save_handle = Some(handle);
    }

    pub(crate) fn take_save_handle(&mut self) -> Option<FrameHandle> {
        self.save_handle.take()
    }
}

impl<C: 'static> Inner<C> {
    /// Resolve a new window target and start its retry loop
    pub(crate) fn update_window_scroll(self: &Rc<Self>, prev: Option<&C>, next: &C) -> Result<ScrollCompletion> {
        // Whatever the previous loop was doing is no longer relevant.
        self.window_state.borrow_mut().cancel();

        let target = self
            .resolver()
            .resolve(None, self.should_update_scroll.as_ref(), prev, next)?;

        let generation = self.window_state.borrow_mut().restart(target.clone());
        tracing::debug!(generation, target = ?target, "window scroll loop started");

        let (sender, completion) = completion_channel();
        self.schedule_window_tick(generation, sender);
        Ok(completion)
    }

    fn schedule_window_tick(self: &Rc<Self>, generation: u64, sender: CompletionSender) {
        let weak = Rc::downgrade(self);
        self.frames.after_frame(Box::new(move || match weak.upgrade() {
            Some(inner) => inner.run_window_tick(generation, sender),
            None => sender.complete(),
        }));
    }

    fn run_window_tick(self: &Rc<Self>, generation: u64, sender: CompletionSender) {
        let start = self.window_state.borrow().begin_tick(generation);
        let target = match start {
            TickStart::Stale => {
                tracing::trace!(generation, "stale window scroll tick");
                sender.complete();
                return;
            }
            TickStart::Idle => {
                self.finish_window_loop(sender);
                return;
            }
            TickStart::Apply(target) => target,
        };

        // No borrow held: scrolling may synchronously emit scroll events.
        apply_scroll_target(&*self.document, &*self.window, &target);

        let max_attempts = self.config.max_window_scroll_attempts;
        let outcome = self
            .window_state
            .borrow_mut()
            .record_attempt(generation, max_attempts);

        match outcome {
            AttemptOutcome::Stale => sender.complete(),
            AttemptOutcome::Retry => self.schedule_window_tick(generation, sender),
            AttemptOutcome::Settled => self.finish_window_loop(sender),
            AttemptOutcome::Exhausted => {
                tracing::trace!(generation, %target, max_attempts, "window scroll gave up");
                self.finish_window_loop(sender);
            }
        }
    }

    /// Capture the window once more and resolve the loop's completion
    fn finish_window_loop(&self, sender: CompletionSender) {
        self.cancel_window_save();
        self.capture_window_position();
        sender.complete();
    }

    /// Window scroll listener
    pub(crate) fn on_window_scroll(self: &Rc<Self>) {
        if self.ignore_scroll_events.get() {
            return;
        }

        let offset = self.window.scroll_offset();
        let converging = {
            let mut state = self.window_state.borrow_mut();
            let converging = state.target().is_some();
            if state.observe_offset(offset) {
                tracing::trace!(%offset, "window reached scroll target");
            }
            converging
        };

        // The running loop captures the window when it finishes.
        if converging {
            return;
        }

        // The scroll may belong to a `POP` that has not been announced yet, so
        // the capture is deferred and dropped if a navigation arrives first.
        self.save_window_position();
    }

    /// Schedule a window capture unless one is already pending
    pub(crate) fn save_window_position(self: &Rc<Self>) {
        if self.window_state.borrow().save_scheduled() {
            return;
        }

        let weak = Rc::downgrade(self);
        let handle = self.frames.after_frame(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.window_state.borrow_mut().take_save_handle();
                inner.capture_window_position();
            }
        }));
        self.window_state.borrow_mut().set_save_handle(handle);
    }

    /// Drop a scheduled window capture, if any
    pub(crate) fn cancel_window_save(&self) {
        let handle = self.window_state.borrow_mut().take_save_handle();
        if let Some(handle) = handle {
            self.frames.cancel(handle);
        }
    }

    /// Write the window's current offsets under the current location
    pub(crate) fn capture_window_position(&self) {
        let location = self.location.current_location();
        let position = self.window.scroll_offset();
        tracing::trace!(key = %location.storage_key(), %position, "capturing window position");
        self.storage.save(&location, None, position);
    }
}
