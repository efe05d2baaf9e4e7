//! Shutdown coordination for the mining agent.

use tokio::sync::broadcast;

/// Broadcast-based shutdown signal shared by every long-running task.
///
/// Tracker loops and the submitter select on their receiver and exit as
/// soon as the signal fires. Workers instead consult [`signalled`] at
/// attempt boundaries, so a search already in flight runs to success or
/// deadline before its loop exits; callers that hold the worker join
/// handles can wait for that drain.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        // Capacity 1 is enough: the signal fires at most once and
        // receivers treat a lag exactly like a delivery.
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Hand out a receiver for one task. Must be called before `trigger`,
    /// receivers subscribed afterwards miss the notification.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Idempotent; send errors mean no subscribers remain.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still holding a receiver.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-blocking signal check for attempt boundaries.
///
/// Returns true once shutdown has been triggered, including when the
/// receiver lagged behind the single buffered notification or the sender
/// is gone.
pub fn signalled(rx: &mut broadcast::Receiver<()>) -> bool {
    !matches!(rx.try_recv(), Err(broadcast::error::TryRecvError::Empty))
}
