//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! TCP accept (Tokio)
//!     |
//!     v
//! request id / trace / timeout layers (request_id.rs, tower-http)
//!     |
//!     v
//! proxy_handler (server.rs)
//!     |
//!     +-- "/" and "/health" answered locally
//!     |
//!     +-- everything else: route table -> forwarder -> relay
//! ```

pub mod request_id;
pub mod server;

pub use request_id::{request_id, MakeRequestUuid, X_REQUEST_ID};
pub use server::GatewayServer;
