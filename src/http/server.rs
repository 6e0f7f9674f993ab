//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request id, tracing, body limit, timeout, metrics)
//! - Keep middleware-generated errors in the JSON envelope
//! - Serve on a bound listener until shutdown, then drain within a deadline

use axum::{
    body::Body,
    middleware,
    routing::{get, post},
    Router,
};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Notify};
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::request::{request_span, MakeUuidRequestId};
use crate::http::response::ensure_error_envelope;
use crate::observability::metrics;
use crate::service::SharedService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: SharedService,
}

/// HTTP server for the gateway API.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server backed by `service`.
    pub fn new(config: GatewayConfig, service: SharedService) -> Self {
        let router = Self::build_router(&config, AppState { service });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/v1/eth/transaction", get(handlers::get_transaction))
            .route("/api/v1/eth/transaction/{hash}", get(handlers::get_transaction_by_path))
            .route("/api/v1/eth/block/latest", get(handlers::get_latest_block))
            .route("/api/v1/eth/balance/{address}", get(handlers::get_balance))
            .route("/api/v1/eth/transfer", post(handlers::transfer))
            .route("/health", get(handlers::health))
            .route_layer(middleware::from_fn(metrics::track_requests))
            .fallback(handlers::not_found)
            .method_not_allowed_fallback(handlers::method_not_allowed)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeUuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
            .layer(middleware::map_response(ensure_error_envelope))
    }

    /// Run the server until `shutdown` fires, then drain.
    ///
    /// In-flight requests get `timeouts.shutdown_grace_secs` to finish; after
    /// that the server future is dropped, cancelling whatever is left.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        let draining = Arc::new(Notify::new());
        let drain_started = draining.clone();

        let server = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown requested, draining in-flight requests");
                drain_started.notify_one();
            })
            .into_future();
        tokio::pin!(server);

        tokio::select! {
            result = &mut server => result?,
            _ = drain_deadline(&draining, grace) => {
                tracing::warn!(
                    grace_secs = grace.as_secs(),
                    "Drain deadline reached, abandoning remaining requests"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn drain_deadline(draining: &Notify, grace: Duration) {
    draining.notified().await;
    tokio::time::sleep(grace).await;
}
