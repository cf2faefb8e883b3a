use super::handlers::health::{handle_health, handle_metrics, handle_ready};
use super::handlers::{daos, paymaster, proposals, votes};
use super::middleware::correlation::correlation_middleware;
use super::middleware::error_envelope::error_envelope_middleware;
use super::middleware::logging::logging_middleware;
use super::middleware::metrics::metrics_middleware;
use super::state::ApiState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use votesprout_core::foundation::VoteSproutError;

pub async fn run_http_server(addr: SocketAddr, state: Arc<ApiState>, body_limit: usize) -> Result<(), VoteSproutError> {
    info!("binding http server addr={}", addr);
    let app = build_router(state, body_limit);
    let listener = TcpListener::bind(addr).await.map_err(|err| VoteSproutError::NetworkError(format!("bind {addr}: {err}")))?;
    info!("HTTP server ready and accepting connections addr={}", addr);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).with_graceful_shutdown(shutdown_signal()).await.map_err(
        |err| {
            error!("HTTP server terminated unexpectedly addr={} error={}", addr, err);
            VoteSproutError::Message(err.to_string())
        },
    )
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal error={}", err);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

pub fn build_router(state: Arc<ApiState>, body_limit: usize) -> Router {
    Router::new()
        .route("/daos", get(daos::list_daos).post(daos::create_dao))
        .route("/daos/:id/proposals", get(proposals::list_proposals).post(proposals::create_proposal))
        .route("/proposals/:id", get(proposals::get_proposal))
        .route("/proposals/:id/vote", post(votes::cast_vote))
        .route("/sponsor", post(paymaster::sponsor))
        .route("/send", post(paymaster::send))
        .route("/receipt", post(paymaster::receipt))
        .route("/health", get(handle_health))
        .route("/ready", get(handle_ready))
        .route("/metrics", get(handle_metrics))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), metrics_middleware))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(error_envelope_middleware))
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(correlation_middleware))
        .with_state(state)
}
