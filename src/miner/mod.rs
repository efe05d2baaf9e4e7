//! Mining pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! tracker snapshots (chain witness + feed identifier)
//!     → candidate.rs (unsigned template with anchor tags)
//!     → scheduler.rs (worker loops, bounded search per attempt)
//!     → submitter.rs (sign, wrap, POST; record in dedup.rs)
//! ```
//!
//! # Constraints
//! - Snapshots are read once per attempt, never mid-search
//! - Worker-to-submitter handoff is a bounded channel; a full queue drops
//!   the candidate instead of stalling the attempt loop
//! - Every submitted identifier lands in the recency buffer before the
//!   POST is spawned

pub mod candidate;
pub mod dedup;
pub mod scheduler;
pub mod submitter;

pub use candidate::{build_candidate, MINT_CONTENT, RELAY_URL};
pub use dedup::RecentSubmissions;
pub use scheduler::{MinedNote, WorkerPool};
pub use submitter::{SubmitError, Submitter};
