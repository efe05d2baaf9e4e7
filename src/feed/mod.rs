//! Event feed subsystem.
//!
//! # Data Flow
//! ```text
//! feed websocket (JSON frames)
//!     → stream.rs (connection loop, immediate reconnect)
//!     → tracker.rs (latest confirmed identifier, listener hook)
//!     → read by mining workers at attempt start
//! ```
//!
//! # Constraints
//! - Reconnect is immediate, no backoff: idle feed time is lost attempts
//! - Malformed frames are skipped, never fatal to the connection
//! - Identifiers are opaque strings; the newest frame always wins

pub mod stream;
pub mod tracker;
pub mod types;

pub use stream::FeedStream;
pub use tracker::FeedTracker;
pub use types::{FeedError, FeedFrame, FeedResult};
