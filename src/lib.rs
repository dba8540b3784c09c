//! Back-Office API Gateway Library
//!
//! Single HTTP entry point in front of the auth, ledger, HR, student and
//! reporting services.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────┐
//!                    │                 GATEWAY                    │
//!                    │                                            │
//!   Client Request   │  ┌──────┐   ┌─────────┐   ┌───────────┐   │
//!   ─────────────────┼─▶│ http │──▶│ routing │──▶│   proxy   │───┼──▶ Backend
//!                    │  │server│   │  table  │   │ forwarder │   │    Service
//!                    │  └──────┘   └─────────┘   └─────┬─────┘   │
//!                    │                                 │         │
//!   Client Response  │  ┌───────────────┐              │         │
//!   ◀────────────────┼──│ proxy relay / │◀─────────────┘         │
//!                    │  │ 502 synthesis │                        │
//!                    │  └───────────────┘                        │
//!                    │                                            │
//!                    │  config · observability · lifecycle        │
//!                    └────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod proxy;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
