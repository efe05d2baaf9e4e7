//! Ledger-side types and error definitions.

use thiserror::Error;

/// Snapshot of the newest observed block of the anchor ledger.
///
/// A witness is immutable once built; the tracker replaces the whole
/// snapshot on every accepted header, so readers never see a hash paired
/// with the wrong number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Witness {
    /// Block hash, 0x-prefixed lowercase hex.
    pub hash: String,
    /// Block number.
    pub number: u64,
}

/// Errors from ledger connection handling.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The configured RPC URL could not be parsed.
    #[error("invalid RPC URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport-level failure (connect, subscribe, or request).
    #[error("RPC transport error: {0}")]
    Transport(String),

    /// The header stream ended without an error.
    #[error("header subscription closed")]
    SubscriptionClosed,
}

/// Result type alias for ledger operations.
pub type ChainResult<T> = Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_witness_equality() {
        let a = Witness {
            hash: "0xabc".to_string(),
            number: 7,
        };
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::InvalidUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.to_string().contains("nope"));
    }
}
