//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic checks on an already-deserialized config
//! - Check URL schemes match their transport (ws feed, http submission)
//! - Validate value ranges (workers > 0, difficulty <= 256)
//!
//! # Design Decisions
//! - Collects every violation instead of stopping at the first
//! - Validation is pure function: AgentConfig → Result<(), Vec<ValidationError>>
//! - Nothing downstream sees a config that has not passed these checks

use thiserror::Error;

use crate::config::schema::AgentConfig;

/// A single semantic violation, tagged with the offending field.
#[derive(Debug, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &AgentConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(
        "chain.rpc_url",
        &config.chain.rpc_url,
        &["ws", "wss", "http", "https"],
        &mut errors,
    );
    check_url("feed.url", &config.feed.url, &["ws", "wss"], &mut errors);
    check_url(
        "submit.endpoint",
        &config.submit.endpoint,
        &["http", "https"],
        &mut errors,
    );

    if config.chain.poll_interval_ms == 0 {
        push(&mut errors, "chain.poll_interval_ms", "must be positive");
    }
    if config.chain.reconnect_base_ms == 0 {
        push(&mut errors, "chain.reconnect_base_ms", "must be positive");
    }
    if config.chain.reconnect_max_ms < config.chain.reconnect_base_ms {
        push(
            &mut errors,
            "chain.reconnect_max_ms",
            "must be at least reconnect_base_ms",
        );
    }
    if config.submit.queue_capacity == 0 {
        push(&mut errors, "submit.queue_capacity", "must be at least 1");
    }
    if config.submit.request_timeout_ms == 0 {
        push(&mut errors, "submit.request_timeout_ms", "must be positive");
    }
    if config.pow.difficulty > 256 {
        push(&mut errors, "pow.difficulty", "cannot exceed 256 bits");
    }
    if config.pow.attempt_timeout_ms == 0 {
        push(&mut errors, "pow.attempt_timeout_ms", "must be positive");
    }
    if config.miner.workers == 0 {
        push(&mut errors, "miner.workers", "must be at least 1");
    }
    if config.miner.recent_capacity == 0 {
        push(&mut errors, "miner.recent_capacity", "must be at least 1");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn push(errors: &mut Vec<ValidationError>, field: &'static str, reason: &str) {
    errors.push(ValidationError {
        field,
        reason: reason.to_string(),
    });
}

fn check_url(
    field: &'static str,
    value: &str,
    schemes: &[&str],
    errors: &mut Vec<ValidationError>,
) {
    match url::Url::parse(value) {
        Ok(url) if schemes.contains(&url.scheme()) => {}
        Ok(url) => errors.push(ValidationError {
            field,
            reason: format!("unsupported scheme `{}`", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field,
            reason: e.to_string(),
        }),
    }
}
