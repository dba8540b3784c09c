//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the proxy and service handlers
//! - Wire up middleware (request id, tracing, timeout)
//! - Bind the server to a listener and serve until shutdown
//! - Dispatch requests through the route table and forwarder
//!
//! # Design Decisions
//! - One catch-all route owns everything except `/` and `/health`; the
//!   route table, not the Axum router, decides where a path goes
//! - The inbound body is buffered up front (bounded by config) because a
//!   retried attempt must resend identical bytes
//! - A routing miss is answered 404 with an empty body and logged at debug,
//!   never as a failure

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::request_id::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::observability::metrics;
use crate::proxy::{bad_gateway, relay_response, Forwarder, OutboundRequest};
use crate::routing::{RouteTable, Service};

/// Metric label for requests no route matched.
const SERVICE_NONE: &str = "none";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub forwarder: Arc<Forwarder>,
    pub max_body_bytes: usize,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let state = AppState {
            routes: Arc::new(RouteTable::new(&config.services)),
            forwarder: Arc::new(Forwarder::new(&config)),
            max_body_bytes: config.listener.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layer order matters: the id is stamped outermost so the trace layer
    /// and everything below see it; the timeout sits innermost so a timed
    /// out response still carries the id.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));

        Router::new()
            .route("/", get(index_handler))
            .route("/health", get(health_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Gateway listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Gateway stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Main proxy handler: resolve the route, forward with retry, relay.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let started = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);

    let Some(route) = state.routes.resolve(&path) else {
        tracing::debug!(request_id = %request_id, method = %method, path = %path, "No route for path");
        metrics::record_request(
            method.as_str(),
            StatusCode::NOT_FOUND.as_u16(),
            SERVICE_NONE,
            started,
        );
        return StatusCode::NOT_FOUND.into_response();
    };
    let service = route.service;
    let target = route.target_url(query.as_deref());

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        service = %service,
        target_url = %target,
        "Proxying request"
    );

    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                path = %path,
                limit = state.max_body_bytes,
                error = %err,
                "Inbound body rejected"
            );
            metrics::record_request(
                method.as_str(),
                StatusCode::PAYLOAD_TOO_LARGE.as_u16(),
                service.name(),
                started,
            );
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let outbound = OutboundRequest::derive(service, method.clone(), &parts.headers, body, target);
    match state.forwarder.send(&outbound).await {
        Ok(upstream) => {
            let status = upstream.status();
            metrics::record_request(method.as_str(), status.as_u16(), service.name(), started);
            relay_response(upstream)
        }
        Err(err) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                target_url = %outbound.target,
                kind = %err.kind(),
                error = %err,
                "Forwarding failed"
            );
            metrics::record_request(
                method.as_str(),
                StatusCode::BAD_GATEWAY.as_u16(),
                service.name(),
                started,
            );
            bad_gateway(err.kind())
        }
    }
}

/// Landing page listing the fronted services.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let mut items = String::new();
    for service in Service::ALL {
        items.push_str(&format!(
            "  <li><strong>{}</strong> &rarr; {}</li>\n",
            service,
            state.routes.base(service)
        ));
    }
    Html(format!(
        "<h2>Back-Office Gateway</h2>\n<ul>\n{items}</ul>\n"
    ))
}

/// Liveness check for the gateway process itself.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "UP" }))
}
