//! Fire-and-forget submission of mined candidates.
//!
//! # Responsibilities
//! - Sign each mined note and wrap it in the wire envelope
//! - POST to the submission endpoint with the browser-impersonation
//!   header set the endpoint requires
//! - Record every submitted identifier in the recency buffer
//!
//! Submission is best effort: rejections and transport errors are logged
//! and the candidate is not retried, its anchors are already going stale.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::SubmitConfig;
use crate::event::{SignedNote, Signer, Submission};
use crate::miner::dedup::RecentSubmissions;
use crate::miner::scheduler::MinedNote;

/// Browser session the requests impersonate. The endpoint rejects
/// anything else, so these values are fixed.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";

fn impersonation_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));
    headers.insert(
        "Sec-ch-ua",
        HeaderValue::from_static(
            "\"Not A(Brand\";v=\"99\", \"Microsoft Edge\";v=\"121\", \"Chromium\";v=\"121\"",
        ),
    );
    headers.insert("Sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("Sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers.insert("Sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("Sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("Sec-fetch-site", HeaderValue::from_static("same-site"));
    headers
}

/// Error type for submitter construction.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("http client error: {0}")]
    Client(String),
}

/// Signs and posts solved candidates from the worker channel.
pub struct Submitter {
    client: reqwest::Client,
    endpoint: String,
    signer: Arc<Signer>,
    recent: Arc<RecentSubmissions>,
}

impl Submitter {
    pub fn new(
        config: &SubmitConfig,
        signer: Arc<Signer>,
        recent: Arc<RecentSubmissions>,
    ) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .default_headers(impersonation_headers())
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| SubmitError::Client(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            signer,
            recent,
        })
    }

    /// Consume wins until every worker has dropped its sender.
    ///
    /// Each POST runs in its own task so a slow endpoint never delays the
    /// next win. A candidate is submitted at most once.
    pub async fn run(self, mut wins: mpsc::Receiver<MinedNote>) {
        while let Some(mined) = wins.recv().await {
            let signed = self.finalize(&mined);
            self.recent.insert(signed.id.clone());

            let client = self.client.clone();
            let endpoint = self.endpoint.clone();
            let search_elapsed = mined.elapsed;
            tokio::spawn(async move {
                post_event(client, endpoint, signed, search_elapsed).await;
            });
        }
        tracing::info!("submitter stopped");
    }

    /// Sign the mined note into its wire form.
    fn finalize(&self, mined: &MinedNote) -> SignedNote {
        let sig = self.signer.sign_id(mined.note.id_bytes());
        SignedNote {
            sig,
            id: mined.id.clone(),
            kind: mined.note.kind,
            created_at: mined.note.created_at,
            tags: mined.note.tags.clone(),
            content: mined.note.content.clone(),
            pubkey: mined.note.pubkey.clone(),
        }
    }
}

async fn post_event(
    client: reqwest::Client,
    endpoint: String,
    signed: SignedNote,
    search_elapsed: Duration,
) {
    let started = Instant::now();
    let result = client
        .post(&endpoint)
        .json(&Submission { event: &signed })
        .send()
        .await;
    match result {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                tracing::info!(
                    id = %signed.id,
                    %status,
                    post_ms = started.elapsed().as_millis() as u64,
                    search_ms = search_elapsed.as_millis() as u64,
                    "candidate submitted"
                );
            } else {
                tracing::warn!(id = %signed.id, %status, "submission rejected");
            }
        }
        Err(e) => {
            tracing::warn!(id = %signed.id, error = %e, "submission failed");
        }
    }
}
