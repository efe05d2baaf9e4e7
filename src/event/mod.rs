//! Note model and signing subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable (secret key)
//!     → signer.rs (key loading, BIP-340 signing)
//! candidate fields
//!     → note.rs (canonical serialization → SHA-256 identifier)
//!     → wire form for submission
//! ```
//!
//! # Security Constraints
//! - Secret keys ONLY from environment variables
//! - Never log key material; the derived public key is the loggable handle

pub mod note;
pub mod signer;

pub use note::{unix_now, Note, SignedNote, Submission, KIND_TEXT_NOTE};
pub use signer::{KeyError, Signer, SECRET_KEY_ENV_VAR};
