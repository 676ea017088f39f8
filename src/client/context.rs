//! Cancellation and deadline propagation for client calls
//!
//! Every client operation takes a [`Context`]. The retry loop checks it before
//! each attempt and before each backoff sleep, and races in-flight requests
//! against [`Context::done`].

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::Error;

/// Cancellation token plus optional deadline.
///
/// Cheap to clone; clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Handle that fires the cancellation of the [`Context`] it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A cancellable context and the handle that cancels it.
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            cancel: Some(rx),
            deadline: None,
        };
        (ctx, CancelHandle { tx })
    }

    /// Derive a context that expires after `timeout` (or earlier, if the
    /// parent already carries a sooner deadline).
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        Self {
            cancel: self.cancel.clone(),
            deadline: Some(match self.deadline {
                Some(existing) if existing < deadline => existing,
                _ => deadline,
            }),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The error this context has fired with, if any.
    pub fn err(&self) -> Option<Error> {
        if self.cancel.as_ref().is_some_and(|rx| *rx.borrow()) {
            return Some(Error::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Error::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    /// Never resolves for a background context.
    pub async fn done(&self) -> Error {
        let cancelled = async {
            match self.cancel.clone() {
                Some(mut rx) => {
                    let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
                    // A dropped handle can never cancel
                    if closed {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = cancelled => Error::Cancelled,
            _ = expired => Error::DeadlineExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_never_fires() {
        let ctx = Context::background();
        assert!(ctx.err().is_none());
        assert!(ctx.deadline().is_none());
    }

    #[tokio::test]
    async fn test_cancel_is_observed_by_clones() {
        let (ctx, handle) = Context::with_cancel();
        let clone = ctx.clone();
        assert!(clone.err().is_none());

        handle.cancel();
        assert!(matches!(clone.err(), Some(Error::Cancelled)));
        assert!(matches!(ctx.done().await, Error::Cancelled));
    }

    #[tokio::test]
    async fn test_timeout_fires() {
        let ctx = Context::background().with_timeout(Duration::from_millis(10));
        assert!(matches!(ctx.done().await, Error::DeadlineExceeded));
        assert!(matches!(ctx.err(), Some(Error::DeadlineExceeded)));
    }

    #[test]
    fn test_child_keeps_sooner_parent_deadline() {
        let parent = Context::background().with_timeout(Duration::from_secs(1));
        let child = parent.with_timeout(Duration::from_secs(60));
        assert_eq!(child.deadline(), parent.deadline());
    }

    #[tokio::test]
    async fn test_dropped_handle_does_not_cancel() {
        let (ctx, handle) = Context::with_cancel();
        drop(handle);
        let ctx = ctx.with_timeout(Duration::from_millis(10));
        assert!(matches!(ctx.done().await, Error::DeadlineExceeded));
    }
}
