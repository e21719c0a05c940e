//! HTTP surface for the recommendation service (axum).
//!
//! Routes, each available both bare and under `/api`:
//!
//! - `POST /recommend` - body `{ "query": "..." }`, answers `{ "recommendations": [...] }`
//! - `GET /health` - liveness with a timestamp
//!
//! Errors are `{ "error": "..." }` with status 400 or 500.

mod handlers;
pub mod models;

use std::{future::Future, io, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::services::RecommendationService;

/// Shared state handed to every handler. The service itself is read-only.
pub struct AppState {
    pub service: RecommendationService,
}

/// Build the router with both route sets and a permissive CORS layer.
pub fn router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/recommend", post(handlers::recommend))
        .route("/health", get(handlers::health));

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve on an existing listener until Ctrl-C. Tests bind `127.0.0.1:0` and pass the listener in.
pub async fn run_server_on_listener(
    listener: TcpListener,
    service: RecommendationService,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!(
        target: "uganda_guide::server",
        "Server running on http://{} (model {}, {} destinations)",
        addr,
        service.model(),
        service.catalog().len()
    );

    let app = router(Arc::new(AppState { service }));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}

/// Resolve once `signal` fires. If the signal cannot be installed, keep serving
/// instead of shutting down straight away.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!(target: "uganda_guide::server", "shutdown signal received"),
        Err(err) => {
            error!(
                target: "uganda_guide::server",
                error = %err,
                "failed to listen for shutdown signal"
            );
            std::future::pending::<()>().await;
        }
    }
}

/// Bind `addr` and serve.
pub async fn run_server(
    addr: &str,
    service: RecommendationService,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    run_server_on_listener(listener, service).await
}
