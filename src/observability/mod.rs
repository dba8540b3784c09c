//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, request id attached)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, separate listener)
//! ```
//!
//! # Design Decisions
//! - Request correlation rides on the `x-request-id` header stamped by the
//!   HTTP layer, not on a separate tracing backend
//! - Metrics recording is always safe to call; it degrades to a no-op when
//!   the exporter is disabled

pub mod logging;
pub mod metrics;
