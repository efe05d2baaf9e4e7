//! Ledger head monitor with subscribe and poll modes.
//!
//! # Responsibilities
//! - Connect to the anchor ledger RPC endpoint
//! - Stream new block headers into the shared [`HeadTracker`]
//! - Reconnect with capped, jittered backoff after transport failures
//!
//! A `ws(s)` URL uses a `newHeads` subscription; an `http(s)` URL falls
//! back to polling the latest header on a fixed cadence.

use std::sync::Arc;
use std::time::Duration;

use alloy::eips::BlockNumberOrTag;
use alloy::providers::{Provider, ProviderBuilder, WsConnect};
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio::time::timeout;

use crate::chain::tracker::HeadTracker;
use crate::chain::types::{ChainError, ChainResult, Witness};
use crate::config::ChainConfig;

/// Per-request timeout for the polling mode.
const POLL_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection loop feeding the witness tracker.
pub struct HeadMonitor {
    config: ChainConfig,
    tracker: Arc<HeadTracker>,
    /// Consecutive failed connection attempts since the last header.
    failures: u32,
}

impl HeadMonitor {
    pub fn new(config: ChainConfig, tracker: Arc<HeadTracker>) -> Self {
        Self {
            config,
            tracker,
            failures: 0,
        }
    }

    /// Run until shutdown. Connection loss is survivable: the tracker keeps
    /// its last witness and this loop reconnects with backoff.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            tokio::select! {
                result = self.connect_and_track() => match result {
                    Ok(()) => tracing::warn!("ledger header stream ended"),
                    Err(e) => tracing::warn!(error = %e, "ledger connection failed"),
                },
                _ = shutdown.recv() => {
                    tracing::info!("head monitor stopping");
                    return;
                }
            }

            self.failures = self.failures.saturating_add(1);
            let delay = reconnect_delay(
                self.failures,
                self.config.reconnect_base_ms,
                self.config.reconnect_max_ms,
            );
            tracing::warn!(
                attempt = self.failures,
                delay_ms = delay.as_millis() as u64,
                "reconnecting to ledger RPC"
            );
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.recv() => {
                    tracing::info!("head monitor stopping");
                    return;
                }
            }
        }
    }

    async fn connect_and_track(&mut self) -> ChainResult<()> {
        if self.config.rpc_url.starts_with("ws") {
            self.subscribe_heads().await
        } else {
            self.poll_heads().await
        }
    }

    /// Subscription mode: push-based `newHeads` over websocket.
    async fn subscribe_heads(&mut self) -> ChainResult<()> {
        let ws = WsConnect::new(self.config.rpc_url.clone());
        let provider = ProviderBuilder::new()
            .connect_ws(ws)
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;
        let subscription = provider
            .subscribe_blocks()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;
        tracing::info!(url = %self.config.rpc_url, "subscribed to ledger heads");

        let mut stream = subscription.into_stream();
        while let Some(header) = stream.next().await {
            self.observe(header.hash.to_string(), header.number);
        }
        Err(ChainError::SubscriptionClosed)
    }

    /// Polling mode for plain HTTP endpoints.
    async fn poll_heads(&mut self) -> ChainResult<()> {
        let url: url::Url = self.config.rpc_url.parse().map_err(|e: url::ParseError| {
            ChainError::InvalidUrl {
                url: self.config.rpc_url.clone(),
                reason: e.to_string(),
            }
        })?;
        let provider = ProviderBuilder::new().connect_http(url);
        tracing::info!(
            url = %self.config.rpc_url,
            interval_ms = self.config.poll_interval_ms,
            "polling ledger heads"
        );

        let mut ticker = tokio::time::interval(Duration::from_millis(self.config.poll_interval_ms));
        loop {
            ticker.tick().await;
            let request = provider.get_block_by_number(BlockNumberOrTag::Latest);
            let block = timeout(POLL_REQUEST_TIMEOUT, request)
                .await
                .map_err(|_| ChainError::Transport("poll request timed out".to_string()))?
                .map_err(|e| ChainError::Transport(e.to_string()))?;
            if let Some(block) = block {
                self.observe(block.header.hash.to_string(), block.header.number);
            }
        }
    }

    fn observe(&mut self, hash: String, number: u64) {
        self.failures = 0;
        if self.tracker.advance(Witness { hash, number }) {
            tracing::debug!(number, "ledger head advanced");
        }
    }
}

/// Capped exponential backoff with jitter. The delay lands uniformly in
/// the upper half of the exponential window.
fn reconnect_delay(failures: u32, base_ms: u64, max_ms: u64) -> Duration {
    let exponent = failures.saturating_sub(1).min(16);
    let window = base_ms
        .saturating_mul(1u64 << exponent)
        .min(max_ms)
        .max(1);
    let jittered = window / 2 + fastrand::u64(..window / 2 + 1);
    Duration::from_millis(jittered.max(1))
}
