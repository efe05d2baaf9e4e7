//! Competitive proof-of-work mining agent.
//!
//! Races to produce mint notes whose identifier clears a leading-zero-bit
//! target, anchored to the newest ledger block and the newest feed event,
//! then fires them at the submission endpoint.
//!
//! # Architecture Overview
//!
//! ```text
//!   ledger RPC ──▶ chain::HeadMonitor ──▶ chain::HeadTracker ─┐
//!                                                             │ snapshots
//!   feed ws ────▶ feed::FeedStream ────▶ feed::FeedTracker ──┤ (lock-free)
//!                                                             ▼
//!                                        miner::WorkerPool ── N attempt loops
//!                                          build candidate → pow::search
//!                                                             │ solved
//!                                                             ▼
//!                                        miner::Submitter ── sign → POST
//!                                                             │
//!                                        miner::RecentSubmissions ◀─┘
//!                                          (read by the feed listener)
//! ```
//!
//! A worker re-reads both tracker snapshots at every attempt start, so no
//! candidate carries anchors older than one attempt timeout.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use noss_miner::chain::{HeadMonitor, HeadTracker};
use noss_miner::config::{load_config, validate_config, AgentConfig, ConfigError};
use noss_miner::event::Signer;
use noss_miner::feed::{FeedStream, FeedTracker};
use noss_miner::lifecycle::Shutdown;
use noss_miner::miner::{RecentSubmissions, Submitter, WorkerPool};

#[derive(Parser)]
#[command(name = "noss-miner", about = "Proof-of-work inscription mining agent")]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of mining workers.
    #[arg(long)]
    workers: Option<usize>,

    /// Override the target difficulty, in leading zero bits.
    #[arg(long)]
    difficulty: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "noss_miner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AgentConfig::default(),
    };
    if let Some(workers) = cli.workers {
        config.miner.workers = workers;
    }
    if let Some(difficulty) = cli.difficulty {
        config.pow.difficulty = difficulty;
    }
    // Overrides bypass the loader, so re-check the merged result.
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(
        workers = config.miner.workers,
        difficulty = config.pow.difficulty,
        chain = %config.chain.rpc_url,
        feed = %config.feed.url,
        "noss-miner starting"
    );

    let signer = Arc::new(Signer::from_env()?);
    let chain = Arc::new(HeadTracker::new());
    let feed = Arc::new(FeedTracker::new());
    let recent = Arc::new(RecentSubmissions::new(config.miner.recent_capacity));

    // Flag feed events this agent mined itself.
    {
        let recent = Arc::clone(&recent);
        feed.set_listener(move |event_id| {
            if recent.contains(event_id) {
                tracing::info!(id = %event_id, "own submission confirmed by feed");
            }
        });
    }

    let shutdown = Shutdown::new();
    tokio::spawn(HeadMonitor::new(config.chain.clone(), Arc::clone(&chain)).run(shutdown.subscribe()));
    tokio::spawn(FeedStream::new(config.feed.clone(), Arc::clone(&feed)).run(shutdown.subscribe()));

    let (wins_tx, wins_rx) = mpsc::channel(config.submit.queue_capacity);
    let submitter = Submitter::new(&config.submit, Arc::clone(&signer), Arc::clone(&recent))?;
    let submitter_task = tokio::spawn(submitter.run(wins_rx));

    let pool = WorkerPool::new(
        Arc::clone(&chain),
        Arc::clone(&feed),
        signer.public_key_hex().to_string(),
        config.pow.difficulty,
        Duration::from_millis(config.pow.attempt_timeout_ms),
        config.miner.workers,
    );
    let workers = pool.spawn(wins_tx, &shutdown);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received, draining in-flight attempts");
    shutdown.trigger();
    for handle in workers {
        let _ = handle.await;
    }
    // Workers gone means the win channel is closed; the submitter drains
    // what it already accepted and exits.
    let _ = submitter_task.await;

    tracing::info!("shutdown complete");
    Ok(())
}
