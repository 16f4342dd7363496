//! HTTP API over the card collection.

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub mod api;

/// Build the router for the JSON API.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health_handler))
        .route("/api/filter", post(api::filter_handler))
        .route("/api/facets", get(api::facets_handler))
        .route("/api/deck/export", post(api::deck_export_handler))
        .with_state(state)
}

/// Serve the API until Ctrl-C is received.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("deckhand listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {err}");
        // no signal handler: keep serving
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}
