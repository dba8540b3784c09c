//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → table.rs (walk the ordered rules)
//!     → first matching rule applies its rewrite
//!     → Return: ResolvedRoute (service + forwarded path) or None
//!
//! Table construction (at startup):
//!     ServicesConfig
//!     → RouteTable::new (fixed rule list, service base URLs)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - The rule list is fixed; only the backend base URLs come from config
//! - No regex in the hot path (exact and prefix matching only)
//! - Deterministic: rules are evaluated in priority order, first match wins
//! - Explicit None on a miss rather than a silent default backend

pub mod table;

pub use table::{ResolvedRoute, RouteTable, Service};
