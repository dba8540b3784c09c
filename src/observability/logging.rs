//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber exactly once, at startup
//! - Derive the default filter from configuration
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the configured level, so a noisy gateway
//!   can be quieted without touching its config file
//! - Events carry structured fields (request id, target URL, attempt) rather
//!   than preformatted strings

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Install the global subscriber. Panics if one is already set, which only
/// happens when called twice.
pub fn init(config: &ObservabilityConfig) {
    let fallback = format!("backoffice_gateway={},tower_http=info", config.log_level);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
