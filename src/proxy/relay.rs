//! Response relay back to the caller.
//!
//! Two exits exist for a forwarded request: relay whatever the upstream
//! answered, or synthesize a 502 when no upstream response exists at all.
//! Upstream bodies stream through untouched, so a large download never
//! buffers inside the gateway. Header values relay byte for byte; header
//! names arrive lowercased from the HTTP layer's parsing and stay that
//! way (header names are case-insensitive on the wire).

use axum::body::{Body, Bytes};
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::proxy::error::FailureKind;
use crate::proxy::headers::strip_hop_by_hop;

/// Body of the synthesized 502 response. `code` is fixed; `message` embeds
/// the machine-readable failure kind.
#[derive(Debug, Serialize)]
struct GatewayErrorBody {
    code: &'static str,
    message: String,
}

/// Relay an upstream response verbatim, minus connection-scoped headers.
///
/// Status, remaining headers and body pass through unchanged; the body is
/// handed over as a stream.
pub fn relay_response<B>(upstream: Response<B>) -> Response<Body>
where
    B: hyper::body::Body<Data = Bytes> + Send + 'static,
    B::Error: Into<axum::BoxError>,
{
    let (mut parts, body) = upstream.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    Response::from_parts(parts, Body::new(body))
}

/// Synthesize the 502 returned when every attempt failed (or a fatal error
/// ended forwarding early).
pub fn bad_gateway(kind: FailureKind) -> Response<Body> {
    let body = GatewayErrorBody {
        code: "BAD_GATEWAY",
        message: format!("Upstream call failed: {kind}"),
    };
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}
