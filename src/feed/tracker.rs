//! Latest confirmed identifier shared with the workers.

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwapOption;
use tokio::sync::watch;

/// Callback invoked for every identifier the feed confirms.
pub type FeedListener = Box<dyn Fn(&str) + Send + Sync>;

/// Holds the newest identifier reported by the feed.
///
/// The stream task is the only writer; workers read lock-free through
/// [`FeedTracker::latest`]. Unlike the ledger witness there is no ordering
/// to defend: identifiers are opaque and the newest frame always wins.
pub struct FeedTracker {
    latest: ArcSwapOption<String>,
    listener: OnceLock<FeedListener>,
    ready_tx: watch::Sender<bool>,
}

impl FeedTracker {
    pub fn new() -> Self {
        let (ready_tx, _) = watch::channel(false);
        Self {
            latest: ArcSwapOption::empty(),
            listener: OnceLock::new(),
            ready_tx,
        }
    }

    /// Record a confirmed identifier and notify the listener, if any.
    ///
    /// The listener runs synchronously on the stream task, so it must stay
    /// cheap; it sees every identifier exactly once, in arrival order.
    pub fn apply(&self, event_id: String) {
        let shared = Arc::new(event_id);
        self.latest.store(Some(Arc::clone(&shared)));
        if !self.ready_tx.send_replace(true) {
            tracing::info!("first feed identifier observed");
        }
        if let Some(listener) = self.listener.get() {
            listener(shared.as_str());
        }
    }

    /// Current identifier, if any frame has arrived yet.
    pub fn latest(&self) -> Option<Arc<String>> {
        self.latest.load_full()
    }

    /// Register the identifier listener. Only the first registration
    /// takes effect; install it before the stream starts.
    pub fn set_listener(&self, listener: impl Fn(&str) + Send + Sync + 'static) {
        let _ = self.listener.set(Box::new(listener));
    }

    /// Wait until at least one identifier has been recorded.
    pub async fn wait_ready(&self) {
        let mut rx = self.ready_tx.subscribe();
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl Default for FeedTracker {
    fn default() -> Self {
        Self::new()
    }
}
