//! Header curation for both proxy directions.
//!
//! Inbound headers are copied onto the outbound request by allow-list, so
//! cookies, tracing baggage and anything else a caller sends never leak to
//! the backends. Upstream response headers pass through by deny-list: only
//! connection-scoped headers are removed, because they describe the
//! gateway-to-backend connection and not the caller-facing one.

use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONNECTION, CONTENT_LENGTH,
    CONTENT_TYPE, TE, TRAILER, TRANSFER_ENCODING, UPGRADE,
};

const KEEP_ALIVE: HeaderName = HeaderName::from_static("keep-alive");
const PROXY_CONNECTION: HeaderName = HeaderName::from_static("proxy-connection");

/// Headers that only describe a single hop and must never be relayed.
const HOP_BY_HOP: [HeaderName; 7] = [
    TRANSFER_ENCODING,
    CONNECTION,
    KEEP_ALIVE,
    PROXY_CONNECTION,
    TRAILER,
    UPGRADE,
    TE,
];

/// Build the outbound header set from the inbound one.
///
/// Only `Authorization` and `Content-Type` are copied when present. `Accept`
/// is always set, falling back to `application/json` when the caller sent
/// none. `Content-Length` is owned by the forwarder and stamped later, once
/// the final body length is known.
pub fn curate_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::new();

    if let Some(auth) = inbound.get(AUTHORIZATION) {
        outbound.insert(AUTHORIZATION, auth.clone());
    }
    if let Some(content_type) = inbound.get(CONTENT_TYPE) {
        outbound.insert(CONTENT_TYPE, content_type.clone());
    }
    let accept = inbound
        .get(ACCEPT)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));
    outbound.insert(ACCEPT, accept);

    outbound
}

/// Remove hop-by-hop headers plus `Content-Length` in place.
///
/// `Content-Length` goes because the transport re-frames the relayed body
/// itself. Applying this twice leaves the map unchanged.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
    headers.remove(CONTENT_LENGTH);
}
