use super::super::state::ApiState;
use super::types::{created, parse_json_body, ApiResult};
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use votesprout_core::domain::NewDao;

#[derive(Debug, Default, Deserialize)]
struct CreateDaoRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

pub async fn list_daos(State(state): State<Arc<ApiState>>) -> ApiResult<Json<Value>> {
    let daos = state.repository.list_daos().await?;
    Ok(Json(json!({ "daos": daos })))
}

pub async fn create_dao(State(state): State<Arc<ApiState>>, body: Bytes) -> ApiResult<Response> {
    let request: CreateDaoRequest = parse_json_body(&body)?;
    let dao = state.repository.create_dao(NewDao { name: request.name.unwrap_or_default(), description: request.description }).await?;
    Ok(created(json!({ "dao": dao })))
}
