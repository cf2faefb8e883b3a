use super::super::state::ApiState;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, trace};
use std::sync::Arc;

pub async fn handle_health() -> impl IntoResponse {
    trace!("health check: ok");
    Json(serde_json::json!({
        "status": "healthy",
    }))
}

pub async fn handle_ready(State(state): State<Arc<ApiState>>) -> Response {
    let storage = state.repository.storage();
    let storage_ok = match storage.health_check().await {
        Ok(()) => true,
        Err(err) => {
            debug!("ready check: storage unhealthy backend={} error={}", storage.backend(), err);
            false
        }
    };
    let paymaster_configured = state.paymaster.is_some();
    let status = if storage_ok { "ready" } else { "degraded" };
    trace!("ready check status={} storage_ok={} paymaster_configured={}", status, storage_ok, paymaster_configured);
    let code = if storage_ok { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (
        code,
        Json(serde_json::json!({
            "status": status,
            "storage": storage.backend().to_string(),
            "storage_ok": storage_ok,
            "paymaster_configured": paymaster_configured,
        })),
    )
        .into_response()
}

pub async fn handle_metrics(State(state): State<Arc<ApiState>>) -> Response {
    match state.metrics.encode() {
        Ok(body) => {
            let mut response = body.into_response();
            response.headers_mut().insert(axum::http::header::CONTENT_TYPE, HeaderValue::from_static("text/plain; version=0.0.4"));
            response
        }
        Err(err) => {
            debug!("metrics encode failed error={}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics_error: {}", err)).into_response()
        }
    }
}
