//! Forwarding error taxonomy.
//!
//! The retry-on-transient / pass-through-on-HTTP-error split is a contract,
//! not an implementation detail: an HTTP response of any status is never an
//! error here, and connection-level failures are modeled as distinct
//! variants so both the relay and the tests can branch on them.

use thiserror::Error;

/// Category of a forwarding failure.
///
/// The `as_str` label ends up verbatim in the synthesized 502 body, so the
/// names are part of the gateway's caller-visible contract and must stay
/// stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// TCP connect or DNS resolution failed.
    Connect,
    /// An attempt exceeded its deadline.
    Timeout,
    /// The connection dropped before a complete response arrived.
    Reset,
    /// The transport failed in a way that is not a connection-level fault.
    Protocol,
    /// The outbound request could not be constructed.
    Request,
    /// A fault inside the gateway itself.
    Internal,
}

impl FailureKind {
    /// Stable machine-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Connect => "connect",
            FailureKind::Timeout => "timeout",
            FailureKind::Reset => "reset",
            FailureKind::Protocol => "protocol",
            FailureKind::Request => "request",
            FailureKind::Internal => "internal",
        }
    }

    /// Connection-level failures may be retried; everything else may not.
    pub fn is_transient(&self) -> bool {
        matches!(self, FailureKind::Connect | FailureKind::Timeout | FailureKind::Reset)
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a forward that produced no upstream response.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// Every attempt failed at the connection level.
    #[error("upstream unreachable after {attempts} attempt(s): {detail}")]
    Transient {
        kind: FailureKind,
        attempts: u32,
        detail: String,
    },

    /// A failure that retrying cannot fix.
    #[error("upstream call failed ({kind}): {detail}")]
    Fatal { kind: FailureKind, detail: String },
}

impl ForwardError {
    /// The failure category, for the 502 body and metrics.
    pub fn kind(&self) -> FailureKind {
        match self {
            ForwardError::Transient { kind, .. } => *kind,
            ForwardError::Fatal { kind, .. } => *kind,
        }
    }
}
