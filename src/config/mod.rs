//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read, deserialize)
//!     → validation.rs (semantic checks on the full struct)
//!     → AgentConfig (validated, immutable)
//!     → handed to each subsystem before any task spawns
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Every field carries a default so an empty file (or no file) works
//! - Serde covers the syntactic layer; validation.rs only checks meaning
//!   and reports the complete error list in one pass
//! - The signing key is NOT part of the config file; it comes from the
//!   environment only (see `event::signer`)

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AgentConfig, ChainConfig, FeedConfig, MinerConfig, PowConfig, SubmitConfig};
pub use validation::{validate_config, ValidationError};
