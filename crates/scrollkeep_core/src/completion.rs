//! Completion of a window scroll update
//!
//! [`ScrollCompletion`] resolves when the window retry loop started by an
//! update terminates, whether it converged, gave up, or was superseded by a
//! newer update. It never resolves with an error.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot::{self, error::TryRecvError};

/// Create a linked sender/completion pair
pub(crate) fn completion_channel() -> (CompletionSender, ScrollCompletion) {
    let (sender, receiver) = oneshot::channel();
    (
        CompletionSender(sender),
        ScrollCompletion {
            receiver,
            done: false,
        },
    )
}

/// Resolving half, carried through the loop's frame callbacks
pub(crate) struct CompletionSender(oneshot::Sender<()>);

impl CompletionSender {
    /// Resolve the completion. A completion nobody holds any more is fine.
    pub(crate) fn complete(self) {
        let _ = self.0.send(());
    }
}

/// Future returned by [`ScrollBehavior::update_scroll`](crate::ScrollBehavior::update_scroll)
///
/// Dropping the engine or its frame scheduler also resolves it, so awaiting a
/// completion can never hang once frames stop being produced for good.
#[derive(Debug)]
#[must_use = "a completion does nothing unless awaited or polled"]
pub struct ScrollCompletion {
    receiver: oneshot::Receiver<()>,
    done: bool,
}

impl ScrollCompletion {
    /// Whether the loop has terminated, without needing an executor
    pub fn is_complete(&mut self) -> bool {
        if !self.done {
            self.done = match self.receiver.try_recv() {
                Ok(()) | Err(TryRecvError::Closed) => true,
                Err(TryRecvError::Empty) => false,
            };
        }
        self.done
    }
}

impl Future for ScrollCompletion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(());
        }

        match Pin::new(&mut this.receiver).poll(cx) {
            // A dropped sender means the loop can no longer run
            Poll::Ready(_) => {
                this.done = true;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
