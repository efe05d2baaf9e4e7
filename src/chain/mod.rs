//! Anchor ledger subsystem.
//!
//! # Data Flow
//! ```text
//! RPC endpoint (ws subscribe or http poll)
//!     → monitor.rs (connection loop, reconnect with backoff)
//!     → tracker.rs (monotonic witness snapshot)
//!     → read by mining workers at attempt start
//! ```
//!
//! # Constraints
//! - The stored witness never moves backwards, even across reconnects
//! - Readers get a whole immutable snapshot; hash and number are never torn
//! - Losing the connection pauses freshness, not the process

pub mod monitor;
pub mod tracker;
pub mod types;

pub use monitor::HeadMonitor;
pub use tracker::HeadTracker;
pub use types::{ChainError, ChainResult, Witness};
