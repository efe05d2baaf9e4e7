//! Monotonic witness snapshot shared with the workers.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::sync::watch;

use crate::chain::types::Witness;

/// Holds the newest accepted ledger witness.
///
/// The monitor task is the only writer; workers read lock-free through
/// [`HeadTracker::latest`]. Readiness is a watch channel so workers park
/// until the first witness lands instead of polling.
pub struct HeadTracker {
    head: ArcSwapOption<Witness>,
    ready_tx: watch::Sender<bool>,
}

impl HeadTracker {
    pub fn new() -> Self {
        let (ready_tx, _) = watch::channel(false);
        Self {
            head: ArcSwapOption::empty(),
            ready_tx,
        }
    }

    /// Apply a header observation. Returns true if the witness advanced.
    ///
    /// Headers that arrive late (number at or below the current one) are
    /// discarded so the stored witness never moves backwards, including
    /// across reconnects that replay an old head.
    pub fn advance(&self, witness: Witness) -> bool {
        let current = self.head.load();
        if let Some(cur) = current.as_ref() {
            if witness.number <= cur.number {
                return false;
            }
        }
        self.head.store(Some(Arc::new(witness)));
        if !self.ready_tx.send_replace(true) {
            tracing::info!("first ledger witness observed");
        }
        true
    }

    /// Current witness, if any has been observed yet.
    pub fn latest(&self) -> Option<Arc<Witness>> {
        self.head.load_full()
    }

    /// Wait until at least one witness has been accepted.
    pub async fn wait_ready(&self) {
        let mut rx = self.ready_tx.subscribe();
        // Only errors if the sender is gone, which cannot outlive `self`.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl Default for HeadTracker {
    fn default() -> Self {
        Self::new()
    }
}
