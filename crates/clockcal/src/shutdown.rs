//! Process-wide shutdown signal.
//!
//! One cancellation token plus the reason recorded by whoever fired it first.
//! Every fatal condition, in either task, ends in [`Shutdown::trigger`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use tokio_util::sync::CancellationToken;

use crate::bus::QueueName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// A queue was at capacity during a health check or a non-blocking send.
    QueueSaturated { queue: QueueName },
    /// The view task returned; `clean` is false when it returned an error.
    ViewExited { clean: bool },
    /// The logic task received a message kind it does not understand.
    UnknownMessage,
    /// Ctrl-C.
    Interrupted,
    /// Explicit request from code.
    Requested,
}

impl ShutdownReason {
    pub fn exit_code(self) -> u8 {
        match self {
            ShutdownReason::ViewExited { clean: true }
            | ShutdownReason::Interrupted
            | ShutdownReason::Requested => 0,
            ShutdownReason::ViewExited { clean: false }
            | ShutdownReason::QueueSaturated { .. }
            | ShutdownReason::UnknownMessage => 1,
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::QueueSaturated { queue } => write!(f, "queue {queue} saturated"),
            ShutdownReason::ViewExited { clean: true } => f.write_str("view exited"),
            ShutdownReason::ViewExited { clean: false } => f.write_str("view failed"),
            ShutdownReason::UnknownMessage => f.write_str("unknown message from view"),
            ShutdownReason::Interrupted => f.write_str("interrupted"),
            ShutdownReason::Requested => f.write_str("shutdown requested"),
        }
    }
}

/// Shared shutdown handle. Clones observe and fire the same signal.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
    reason: Arc<OnceLock<ShutdownReason>>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the signal. Only the first call records its reason and returns
    /// `true`; later calls are no-ops.
    pub fn trigger(&self, reason: ShutdownReason) -> bool {
        if self.reason.set(reason).is_err() {
            log::debug!("shutdown already triggered; ignoring {reason}");
            return false;
        }
        log::info!("shutdown: {reason}");
        self.token.cancel();
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The reason recorded by the first trigger.
    pub fn reason(&self) -> Option<ShutdownReason> {
        self.reason.get().copied()
    }

    /// Resolves once the signal has fired.
    pub async fn triggered(&self) -> ShutdownReason {
        self.token.cancelled().await;
        // The reason is stored before the token is cancelled.
        self.reason().unwrap_or(ShutdownReason::Requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_trigger_wins() {
        let shutdown = Shutdown::new();
        let other = shutdown.clone();
        assert!(!shutdown.is_triggered());

        assert!(other.trigger(ShutdownReason::UnknownMessage));
        assert!(!shutdown.trigger(ShutdownReason::Interrupted));
        assert!(!other.trigger(ShutdownReason::ViewExited { clean: true }));

        assert!(shutdown.is_triggered());
        assert_eq!(shutdown.reason(), Some(ShutdownReason::UnknownMessage));
    }

    #[tokio::test]
    async fn waiters_see_the_first_reason() {
        let shutdown = Shutdown::new();
        let waiter = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move { shutdown.triggered().await })
        };
        shutdown.trigger(ShutdownReason::QueueSaturated { queue: QueueName::LogicToView });
        shutdown.trigger(ShutdownReason::Requested);

        let reason = waiter.await.expect("join");
        assert_eq!(reason, ShutdownReason::QueueSaturated { queue: QueueName::LogicToView });
    }

    #[test]
    fn exit_codes() {
        assert_eq!(ShutdownReason::ViewExited { clean: true }.exit_code(), 0);
        assert_eq!(ShutdownReason::Interrupted.exit_code(), 0);
        assert_eq!(ShutdownReason::ViewExited { clean: false }.exit_code(), 1);
        assert_eq!(ShutdownReason::UnknownMessage.exit_code(), 1);
        assert_eq!(
            ShutdownReason::QueueSaturated { queue: QueueName::ViewToLogic }.exit_code(),
            1
        );
    }
}
