//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → Workers finish in-flight attempts → Join → Exit
//! ```
//!
//! # Design Decisions
//! - Single broadcast channel fans the signal out to every task
//! - Workers poll at attempt boundaries, never mid-search
//! - The binary joins worker handles so drained attempts still submit

pub mod shutdown;

pub use shutdown::{signalled, Shutdown};
