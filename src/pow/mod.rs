//! Proof-of-work subsystem.
//!
//! # Data Flow
//! ```text
//! candidate template (from miner::candidate)
//!     → nonce.rs (alphabet-folded random draws)
//!     → search.rs (rewrite nonce + timestamp, hash, compare)
//!     → difficulty.rs (leading zero bits of the identifier)
//!     → SearchReport back to the worker
//! ```
//!
//! The search is pure CPU and synchronous; workers run it on the blocking
//! pool so the async runtime stays responsive.

pub mod difficulty;
pub mod nonce;
pub mod search;

pub use difficulty::{hex_difficulty, leading_zero_bits};
pub use nonce::{NonceSampler, NONCE_ALPHABET, NONCE_LEN};
pub use search::{search, SearchOutcome, SearchReport};
