//! Feed connection loop.
//!
//! # Responsibilities
//! - Open the feed websocket with the handshake headers the endpoint
//!   expects from a browser session
//! - Decode frames and push identifiers into the shared [`FeedTracker`]
//! - Reconnect immediately on any transport failure
//!
//! There is deliberately no backoff here: while the agent is not connected
//! it is mining against a stale identifier, so reconnect latency is paid
//! in lost attempts.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;

use crate::config::FeedConfig;
use crate::feed::tracker::FeedTracker;
use crate::feed::types::{FeedError, FeedFrame, FeedResult};

/// Browser session the handshake impersonates. The endpoint rejects
/// anything else, so these values are fixed.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
const ORIGIN: &str = "https://noscription.org";
const HOST: &str = "report-worker-2.noscription.org";

/// Connection loop feeding the identifier tracker.
pub struct FeedStream {
    config: FeedConfig,
    tracker: Arc<FeedTracker>,
}

impl FeedStream {
    pub fn new(config: FeedConfig, tracker: Arc<FeedTracker>) -> Self {
        Self { config, tracker }
    }

    /// Run until shutdown, reconnecting on every stream end.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            tokio::select! {
                result = self.read_stream() => match result {
                    Ok(()) => tracing::warn!("feed stream ended, reconnecting"),
                    Err(e) => tracing::warn!(error = %e, "feed stream ended, reconnecting"),
                },
                _ = shutdown.recv() => {
                    tracing::info!("feed stream stopping");
                    return;
                }
            }
        }
    }

    async fn read_stream(&self) -> FeedResult<()> {
        let request = self.handshake_request()?;
        let (mut ws, _) = connect_async(request)
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        tracing::info!(url = %self.config.url, "feed connected");

        while let Some(frame) = ws.next().await {
            match frame {
                Ok(Message::Text(text)) => self.handle_frame(&text),
                Ok(Message::Close(_)) => return Err(FeedError::Closed),
                Ok(_) => {}
                Err(e) => return Err(FeedError::Transport(e.to_string())),
            }
        }
        Err(FeedError::Closed)
    }

    fn handshake_request(&self) -> FeedResult<Request> {
        let mut request = self
            .config
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        let headers = request.headers_mut();
        headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));
        headers.insert("Origin", HeaderValue::from_static(ORIGIN));
        headers.insert("Host", HeaderValue::from_static(HOST));
        Ok(request)
    }

    /// Frames that do not decode are dropped without touching the
    /// connection; the next well-formed frame updates state normally.
    fn handle_frame(&self, text: &str) {
        match serde_json::from_str::<FeedFrame>(text) {
            Ok(frame) => self.tracker.apply(frame.event_id),
            Err(e) => tracing::debug!(error = %e, "skipping malformed feed frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_carries_browser_headers() {
        let stream = FeedStream::new(
            FeedConfig {
                url: "ws://127.0.0.1:9/".to_string(),
            },
            Arc::new(FeedTracker::new()),
        );
        let request = stream.handshake_request().unwrap();
        let headers = request.headers();
        assert_eq!(headers.get("User-Agent").unwrap(), USER_AGENT);
        assert_eq!(headers.get("Origin").unwrap(), ORIGIN);
        assert_eq!(headers.get("Host").unwrap(), HOST);
    }

    #[test]
    fn test_malformed_frame_leaves_tracker_alone() {
        let tracker = Arc::new(FeedTracker::new());
        let stream = FeedStream::new(
            FeedConfig {
                url: "ws://127.0.0.1:9/".to_string(),
            },
            Arc::clone(&tracker),
        );

        stream.handle_frame("not json");
        stream.handle_frame(r#"{"eventId":42}"#);
        assert!(tracker.latest().is_none());

        stream.handle_frame(r#"{"eventId":"good"}"#);
        assert_eq!(tracker.latest().unwrap().as_str(), "good");
    }
}
