//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the agent.
//! All types derive Serde traits, and every field carries a default so a
//! missing or partial file still yields a runnable configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the mining agent.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AgentConfig {
    /// Anchor ledger connection.
    pub chain: ChainConfig,

    /// Event feed connection.
    pub feed: FeedConfig,

    /// Submission endpoint settings.
    pub submit: SubmitConfig,

    /// Proof-of-work parameters.
    pub pow: PowConfig,

    /// Worker pool sizing.
    pub miner: MinerConfig,
}

/// Anchor ledger connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// RPC endpoint. `ws(s)` URLs subscribe to new heads; `http(s)` URLs
    /// poll the latest header instead.
    pub rpc_url: String,

    /// Poll cadence for HTTP endpoints, in milliseconds.
    pub poll_interval_ms: u64,

    /// Base reconnect delay after a transport failure, in milliseconds.
    pub reconnect_base_ms: u64,

    /// Reconnect delay cap, in milliseconds.
    pub reconnect_max_ms: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "wss://arb1.arbitrum.io/ws".to_string(),
            poll_interval_ms: 200,
            reconnect_base_ms: 250,
            reconnect_max_ms: 5_000,
        }
    }
}

/// Event feed connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed websocket URL.
    pub url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "wss://report-worker-2.noscription.org".to_string(),
        }
    }
}

/// Submission endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// Submission endpoint URL.
    pub endpoint: String,

    /// Per-request timeout, in milliseconds.
    pub request_timeout_ms: u64,

    /// Bound of the worker-to-submitter handoff queue.
    pub queue_capacity: usize,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-worker.noscription.org/inscribe/postEvent".to_string(),
            request_timeout_ms: 10_000,
            queue_capacity: 64,
        }
    }
}

/// Proof-of-work parameters.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct PowConfig {
    /// Target difficulty, in leading zero bits of the identifier.
    pub difficulty: u32,

    /// Per-attempt search deadline, in milliseconds. Stale snapshots are
    /// re-read after every expiry, so this bounds how old an attempt's
    /// anchors can get.
    pub attempt_timeout_ms: u64,
}

impl Default for PowConfig {
    fn default() -> Self {
        Self {
            difficulty: 21,
            attempt_timeout_ms: 1_000,
        }
    }
}

/// Worker pool sizing.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Number of concurrent attempt loops.
    pub workers: usize,

    /// Capacity of the recently-submitted identifier buffer.
    pub recent_capacity: usize,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            recent_capacity: 200,
        }
    }
}
