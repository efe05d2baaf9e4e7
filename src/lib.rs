//! Competitive proof-of-work mining agent library.

pub mod chain;
pub mod config;
pub mod event;
pub mod feed;
pub mod lifecycle;
pub mod miner;
pub mod pow;

pub use config::AgentConfig;
pub use lifecycle::Shutdown;
