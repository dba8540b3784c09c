//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check service base URLs are well-formed http(s) URLs
//! - Validate value ranges (attempts >= 1, timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig -> Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "services.auth").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_addr(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.listener.max_body_bytes == 0 {
        push(&mut errors, "listener.max_body_bytes", "must be greater than zero");
    }

    check_base_url(&mut errors, "services.auth", &config.services.auth);
    check_base_url(&mut errors, "services.ledger", &config.services.ledger);
    check_base_url(&mut errors, "services.hr", &config.services.hr);
    check_base_url(&mut errors, "services.student", &config.services.student);
    check_base_url(&mut errors, "services.reporting", &config.services.reporting);

    if config.retries.max_attempts == 0 {
        push(&mut errors, "retries.max_attempts", "must be at least 1");
    }
    if config.retries.backoff_step_ms == 0 {
        push(&mut errors, "retries.backoff_step_ms", "must be greater than zero");
    }

    if config.timeouts.connect_secs == 0 {
        push(&mut errors, "timeouts.connect_secs", "must be greater than zero");
    }
    if config.timeouts.upstream_secs == 0 {
        push(&mut errors, "timeouts.upstream_secs", "must be greater than zero");
    }
    if config.timeouts.request_secs == 0 {
        push(&mut errors, "timeouts.request_secs", "must be greater than zero");
    }

    if config.observability.metrics_enabled {
        check_addr(&mut errors, "observability.metrics_address", &config.observability.metrics_address);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn push(errors: &mut Vec<ValidationError>, field: &str, message: &str) {
    errors.push(ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    });
}

fn check_addr(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        push(errors, field, "not a valid socket address (host:port)");
    }
}

fn check_base_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    match Url::parse(value) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                push(errors, field, "scheme must be http or https");
            } else if url.host_str().is_none() {
                push(errors, field, "missing host");
            }
        }
        Err(_) => push(errors, field, "not a valid URL"),
    }
}
