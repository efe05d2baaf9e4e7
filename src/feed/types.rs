//! Feed-side types and error definitions.

use serde::Deserialize;
use thiserror::Error;

/// A frame from the feed. Only the event identifier is consumed; any
/// other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct FeedFrame {
    #[serde(rename = "eventId")]
    pub event_id: String,
}

/// Errors from feed connection handling.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Handshake or websocket transport failure.
    #[error("feed transport error: {0}")]
    Transport(String),

    /// The remote closed the connection.
    #[error("feed connection closed by remote")]
    Closed,
}

/// Result type alias for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_decodes_event_id() {
        let frame: FeedFrame = serde_json::from_str(r#"{"eventId":"abc123"}"#).unwrap();
        assert_eq!(frame.event_id, "abc123");
    }

    #[test]
    fn test_frame_ignores_extra_fields() {
        let frame: FeedFrame =
            serde_json::from_str(r#"{"eventId":"abc","blockNumber":7,"other":null}"#).unwrap();
        assert_eq!(frame.event_id, "abc");
    }

    #[test]
    fn test_frame_rejects_wrong_shape() {
        assert!(serde_json::from_str::<FeedFrame>(r#"{"eventId":123}"#).is_err());
        assert!(serde_json::from_str::<FeedFrame>(r#"{"id":"abc"}"#).is_err());
        assert!(serde_json::from_str::<FeedFrame>("not json").is_err());
    }
}
