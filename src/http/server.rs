//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single `GET /` handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Fetch the upstream document and serve the rewritten copy
//! - Map upstream failures to gateway errors

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::mapper::Pipeline;
use crate::observability::metrics;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Extra time the outer timeout layer allows on top of the upstream timeout,
/// so a slow control plane surfaces as 504 rather than 408.
pub const REQUEST_TIMEOUT_GRACE: Duration = Duration::from_secs(1);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub pipeline: Arc<Pipeline>,
}

/// HTTP server for the mapper.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, UpstreamError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let upstream = UpstreamClient::new(config.base_endpoint.clone(), timeout)?;
        let pipeline = Pipeline::from_options(&config.options);

        tracing::info!(
            operations = ?pipeline.operations().iter().map(|op| op.name()).collect::<Vec<_>>(),
            "Mapper pipeline assembled"
        );

        let state = AppState {
            upstream,
            pipeline: Arc::new(pipeline),
        };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(map_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(
                Duration::from_secs(config.request_timeout_secs) + REQUEST_TIMEOUT_GRACE,
            ))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.base_endpoint,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let status = match &self {
            UpstreamError::Request(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, "Failed to fetch routing document").into_response()
    }
}

/// Fetches the upstream document and returns the rewritten copy.
async fn map_handler(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let document = match state.upstream.fetch().await {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(
                endpoint = %state.upstream.endpoint(),
                error = %e,
                "Upstream fetch failed"
            );
            let response = e.into_response();
            metrics::record_request(response.status().as_u16(), start);
            return response;
        }
    };

    tracing::debug!(
        routers = document.http.routers.len(),
        services = document.http.services.len(),
        middlewares = document.http.middlewares.len(),
        "Routing document fetched"
    );

    let mapped = state.pipeline.apply(document);
    metrics::record_operations(&state.pipeline);
    metrics::record_request(StatusCode::OK.as_u16(), start);

    Json(mapped).into_response()
}
