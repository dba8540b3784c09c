//! Upstream request execution with bounded retry.
//!
//! # Responsibilities
//! - Derive the outbound call (curated headers, body eligibility, BOM strip)
//!   from the inbound request
//! - Execute it against the backend with a per-attempt deadline
//! - Retry connection-level failures with linear backoff, up to the
//!   configured attempt count
//!
//! # Design Decisions
//! - The inbound body is buffered once and shared across attempts, so a
//!   retry never replays a half-consumed stream
//! - A response with any HTTP status, including 5xx, ends the retry loop:
//!   the backend answered, and its answer belongs to the caller
//! - Backoff sleeps are `tokio::time::sleep`, so a waiting request never
//!   pins a runtime worker

use std::error::Error as _;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, Method, Request};
use hyper::body::Incoming;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::{Client, Error as ClientError};
use hyper_util::rt::TokioExecutor;
use tokio::time;

use crate::config::{GatewayConfig, RetryConfig};
use crate::observability::metrics;
use crate::proxy::error::{FailureKind, ForwardError};
use crate::proxy::headers::curate_request_headers;
use crate::routing::Service;

/// Byte-order mark some Windows clients prepend to JSON bodies.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Longest body snippet emitted when body logging is enabled.
const BODY_SNIPPET_LIMIT: usize = 1000;

/// The outbound call, fully derived before the first attempt so every retry
/// sends byte-identical traffic.
#[derive(Debug)]
pub struct OutboundRequest {
    pub service: Service,
    pub method: Method,
    pub target: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl OutboundRequest {
    /// Derive the outbound call from the inbound request.
    ///
    /// Only POST, PUT and PATCH carry a body upstream, and only when the
    /// inbound body is non-empty. A leading UTF-8 BOM is stripped before the
    /// body is measured, so the stamped `Content-Length` always matches the
    /// bytes actually sent.
    pub fn derive(
        service: Service,
        method: Method,
        inbound_headers: &HeaderMap,
        body: Bytes,
        target: String,
    ) -> Self {
        let mut headers = curate_request_headers(inbound_headers);

        let body = if carries_body(&method) && !body.is_empty() {
            let (body, stripped) = strip_utf8_bom(body);
            if stripped {
                tracing::info!(target_url = %target, "Stripped UTF-8 BOM from request body");
            }
            headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len() as u64));
            Some(body)
        } else {
            None
        };

        Self {
            service,
            method,
            target,
            headers,
            body,
        }
    }
}

/// Whether requests with this method forward their body.
fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Drop a leading UTF-8 BOM. Returns the body and whether bytes were removed.
fn strip_utf8_bom(body: Bytes) -> (Bytes, bool) {
    if body.len() >= UTF8_BOM.len() && body[..UTF8_BOM.len()] == UTF8_BOM {
        (body.slice(UTF8_BOM.len()..), true)
    } else {
        (body, false)
    }
}

/// Delay before the retry that follows `failed_attempts` failures.
fn backoff_delay(step_ms: u64, failed_attempts: u32) -> Duration {
    Duration::from_millis(step_ms.saturating_mul(u64::from(failed_attempts)))
}

/// Executes outbound calls against the backends.
///
/// One instance serves the whole gateway; the underlying client pools
/// connections per backend host.
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    retry: RetryConfig,
    attempt_timeout: Duration,
    log_bodies: bool,
}

impl Forwarder {
    pub fn new(config: &GatewayConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            retry: config.retries.clone(),
            attempt_timeout: Duration::from_secs(config.timeouts.upstream_secs),
            log_bodies: config.observability.log_bodies,
        }
    }

    /// Execute the outbound call, retrying transient failures.
    ///
    /// Returns the first upstream response, whatever its status, or the
    /// failure of the last attempt once the budget is spent. Non-transient
    /// failures end the loop immediately.
    pub async fn send(
        &self,
        outbound: &OutboundRequest,
    ) -> Result<hyper::Response<Incoming>, ForwardError> {
        if self.log_bodies {
            self.log_outbound_body(outbound);
        }

        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1u32;
        loop {
            let request = build_attempt(outbound)?;
            let (kind, detail) =
                match time::timeout(self.attempt_timeout, self.client.request(request)).await {
                    Ok(Ok(response)) => return Ok(response),
                    Ok(Err(err)) => (classify_client_error(&err), err.to_string()),
                    Err(_) => (
                        FailureKind::Timeout,
                        format!("no response within {}s", self.attempt_timeout.as_secs()),
                    ),
                };

            if !kind.is_transient() {
                return Err(ForwardError::Fatal { kind, detail });
            }
            if attempt >= max_attempts {
                return Err(ForwardError::Transient {
                    kind,
                    attempts: attempt,
                    detail,
                });
            }

            let delay = backoff_delay(self.retry.backoff_step_ms, attempt);
            tracing::warn!(
                target_url = %outbound.target,
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %detail,
                "Transient upstream failure, retrying"
            );
            metrics::record_retry(outbound.service.name());
            time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Diagnostic body logging, off by default. Bodies can carry credentials
    /// and personal records, so this only ever runs when explicitly enabled.
    fn log_outbound_body(&self, outbound: &OutboundRequest) {
        let Some(body) = &outbound.body else { return };
        let snippet_len = body.len().min(BODY_SNIPPET_LIMIT);
        tracing::info!(
            method = %outbound.method,
            target_url = %outbound.target,
            content_type = ?outbound.headers.get(CONTENT_TYPE),
            bytes = body.len(),
            truncated = body.len() > snippet_len,
            body = %String::from_utf8_lossy(&body[..snippet_len]),
            "Outbound request body"
        );
    }
}

/// Build the hyper request for one attempt.
fn build_attempt(outbound: &OutboundRequest) -> Result<Request<Body>, ForwardError> {
    let mut builder = Request::builder()
        .method(outbound.method.clone())
        .uri(outbound.target.as_str());
    if let Some(headers) = builder.headers_mut() {
        *headers = outbound.headers.clone();
    }

    let body = match &outbound.body {
        Some(bytes) => Body::from(bytes.clone()),
        None => Body::empty(),
    };
    builder.body(body).map_err(|err| ForwardError::Fatal {
        kind: FailureKind::Request,
        detail: err.to_string(),
    })
}

/// Map a client error onto the failure taxonomy by walking its cause chain.
fn classify_client_error(err: &ClientError) -> FailureKind {
    if err.is_connect() {
        return FailureKind::Connect;
    }

    let mut cause: Option<&(dyn std::error::Error + 'static)> = err.source();
    while let Some(current) = cause {
        if let Some(hyper_err) = current.downcast_ref::<hyper::Error>() {
            if hyper_err.is_timeout() {
                return FailureKind::Timeout;
            }
            if hyper_err.is_incomplete_message() || hyper_err.is_canceled() {
                return FailureKind::Reset;
            }
        }
        if let Some(io_err) = current.downcast_ref::<std::io::Error>() {
            return match io_err.kind() {
                std::io::ErrorKind::ConnectionRefused
                | std::io::ErrorKind::NotConnected
                | std::io::ErrorKind::AddrNotAvailable => FailureKind::Connect,
                std::io::ErrorKind::ConnectionReset
                | std::io::ErrorKind::ConnectionAborted
                | std::io::ErrorKind::BrokenPipe
                | std::io::ErrorKind::UnexpectedEof => FailureKind::Reset,
                std::io::ErrorKind::TimedOut => FailureKind::Timeout,
                _ => FailureKind::Protocol,
            };
        }
        cause = current.source();
    }

    FailureKind::Protocol
}
