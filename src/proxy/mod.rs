//! Forwarding pipeline: everything between "route resolved" and "response
//! written".
//!
//! # Data Flow
//! ```text
//! inbound request
//!     |
//!     v
//! OutboundRequest::derive  (headers curated, body eligibility, BOM strip)
//!     |
//!     v
//! Forwarder::send          (per-attempt deadline, bounded linear retry)
//!     |
//!     +-- upstream response --> relay_response (hop-by-hop filtered)
//!     |
//!     +-- ForwardError -------> bad_gateway    (synthesized 502)
//! ```

pub mod error;
pub mod forwarder;
pub mod headers;
pub mod relay;

pub use error::{FailureKind, ForwardError};
pub use forwarder::{Forwarder, OutboundRequest};
pub use relay::{bad_gateway, relay_response};
