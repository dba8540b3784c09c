//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) config file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the back-office gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, inbound body cap).
    pub listener: ListenerConfig,

    /// Base URLs of the backend services the gateway fronts.
    pub services: ServicesConfig,

    /// Retry policy for transient upstream failures.
    pub retries: RetryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum inbound request body size in bytes. Bodies are buffered so
    /// they can be replayed across retry attempts, so this bounds memory.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Base URLs of the five backend services.
///
/// Each one can also be overridden through the environment
/// (`GATEWAY_AUTH_URL` and friends, see the loader).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Auth service (also serves `/admin/**`).
    pub auth: String,

    /// Ledger service (`/transactions`).
    pub ledger: String,

    /// HR service (`/hr/**`, forwarded without the `/hr` prefix).
    pub hr: String,

    /// Student service (`/students`, `/_student/students`, `/student-reports`).
    pub student: String,

    /// Reporting service (`/reports/**`).
    pub reporting: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            auth: "http://localhost:9092".to_string(),
            ledger: "http://localhost:9091".to_string(),
            hr: "http://localhost:9094".to_string(),
            student: "http://localhost:9095".to_string(),
            reporting: "http://localhost:9096".to_string(),
        }
    }
}

/// Retry policy for upstream calls.
///
/// Only connection-level failures are retried; a response with any HTTP
/// status counts as success of transport and is never retried.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total number of attempts (first try included).
    pub max_attempts: u32,

    /// Linear backoff step in milliseconds: the delay before retry N is
    /// `backoff_step_ms * N` (150ms before attempt 2, 300ms before 3, ...).
    pub backoff_step_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step_ms: 150,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for a single upstream attempt in seconds.
    pub upstream_secs: u64,

    /// Whole inbound request deadline in seconds. Must leave room for
    /// `max_attempts` upstream attempts plus backoff.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 15,
            request_secs: 60,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log outbound request bodies (truncated snippet). Diagnostic only;
    /// keep disabled outside debugging sessions.
    pub log_bodies: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_bodies: false,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
