//! Concurrent attempt loops.
//!
//! # Responsibilities
//! - Spawn one attempt loop per configured worker
//! - Re-read the tracker snapshots at every attempt start, so a worker can
//!   never carry anchors older than one attempt timeout
//! - Hand solved candidates to the submitter over a bounded channel
//!
//! The loops check shutdown only at attempt boundaries; the join handles
//! returned by [`WorkerPool::spawn`] let the binary wait for in-flight
//! searches to drain.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::chain::HeadTracker;
use crate::event::Note;
use crate::feed::FeedTracker;
use crate::lifecycle;
use crate::miner::candidate::build_candidate;
use crate::pow::{search, NonceSampler, SearchOutcome};

/// A solved candidate handed from a worker to the submitter.
#[derive(Debug)]
pub struct MinedNote {
    /// The note in its solved state, nonce tag included.
    pub note: Note,
    /// Identifier, lowercase hex.
    pub id: String,
    /// Worker slot that found it.
    pub worker: usize,
    /// Search time for this attempt.
    pub elapsed: Duration,
    /// Hashes tried in this attempt.
    pub iterations: u64,
}

/// Pool of attempt loops sharing the tracker snapshots.
pub struct WorkerPool {
    chain: Arc<HeadTracker>,
    feed: Arc<FeedTracker>,
    pubkey: String,
    difficulty: u32,
    attempt_timeout: Duration,
    workers: usize,
}

impl WorkerPool {
    pub fn new(
        chain: Arc<HeadTracker>,
        feed: Arc<FeedTracker>,
        pubkey: String,
        difficulty: u32,
        attempt_timeout: Duration,
        workers: usize,
    ) -> Self {
        Self {
            chain,
            feed,
            pubkey,
            difficulty,
            attempt_timeout,
            workers,
        }
    }

    /// Spawn the attempt loops and return their join handles.
    pub fn spawn(
        &self,
        wins: mpsc::Sender<MinedNote>,
        shutdown: &lifecycle::Shutdown,
    ) -> Vec<JoinHandle<()>> {
        tracing::info!(
            workers = self.workers,
            difficulty = self.difficulty,
            attempt_timeout_ms = self.attempt_timeout.as_millis() as u64,
            "starting mining workers"
        );
        (0..self.workers)
            .map(|slot| {
                let chain = Arc::clone(&self.chain);
                let feed = Arc::clone(&self.feed);
                let wins = wins.clone();
                let rx = shutdown.subscribe();
                let pubkey = self.pubkey.clone();
                tokio::spawn(attempt_loop(
                    slot,
                    chain,
                    feed,
                    pubkey,
                    self.difficulty,
                    self.attempt_timeout,
                    wins,
                    rx,
                ))
            })
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
async fn attempt_loop(
    slot: usize,
    chain: Arc<HeadTracker>,
    feed: Arc<FeedTracker>,
    pubkey: String,
    difficulty: u32,
    attempt_timeout: Duration,
    wins: mpsc::Sender<MinedNote>,
    mut shutdown: broadcast::Receiver<()>,
) {
    tracing::debug!(slot, "worker started");
    loop {
        if lifecycle::signalled(&mut shutdown) {
            break;
        }

        // Park until both trackers have published at least once.
        tokio::select! {
            _ = async {
                chain.wait_ready().await;
                feed.wait_ready().await;
            } => {}
            _ = shutdown.recv() => break,
        }
        let (Some(witness), Some(feed_id)) = (chain.latest(), feed.latest()) else {
            continue;
        };

        // Fresh template per attempt; no state survives between attempts.
        let template = build_candidate(&pubkey, &witness, &feed_id);
        let blocking = tokio::task::spawn_blocking(move || {
            let mut sampler = NonceSampler::new();
            search(template, difficulty, attempt_timeout, &mut sampler)
        });
        let report = match blocking.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(slot, error = %e, "search task failed");
                continue;
            }
        };

        match report.outcome {
            SearchOutcome::Solved { id } => {
                tracing::info!(
                    slot,
                    id = %id,
                    iterations = report.iterations,
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    "nonce found"
                );
                let mined = MinedNote {
                    note: report.note,
                    id,
                    worker: slot,
                    elapsed: report.elapsed,
                    iterations: report.iterations,
                };
                if let Err(e) = wins.try_send(mined) {
                    // Never block the attempt loop on the submit queue.
                    tracing::warn!(slot, error = %e, "dropping solved candidate");
                }
            }
            SearchOutcome::Exhausted => {
                tracing::trace!(
                    slot,
                    iterations = report.iterations,
                    "attempt exhausted, re-reading snapshots"
                );
            }
        }
    }
    tracing::debug!(slot, "worker stopped");
}
