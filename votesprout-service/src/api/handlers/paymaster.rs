//! Pass-through of account-abstraction calls to the paymaster, holding the API key server-side.

use super::super::state::ApiState;
use super::super::util::serde_helpers::is_missing;
use super::types::{parse_json_body, ApiError, ApiResult};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use votesprout_core::infrastructure::rpc::PaymasterClient;

pub const API_KEY_MISSING: &str = "PAYMASTER_API_KEY not set";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserOperationRequest {
    #[serde(default)]
    user_operation: Option<Value>,
    #[serde(default)]
    entry_point: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptRequest {
    #[serde(default)]
    user_op_hash: Option<Value>,
}

fn user_operation_args(body: &Bytes) -> ApiResult<(Value, Value)> {
    let request: UserOperationRequest = parse_json_body(body)?;
    if is_missing(request.user_operation.as_ref()) || is_missing(request.entry_point.as_ref()) {
        return Err(ApiError::bad_request("Missing userOperation or entryPoint"));
    }
    Ok((request.user_operation.unwrap_or_default(), request.entry_point.unwrap_or_default()))
}

fn client<'a>(state: &'a ApiState, method: &str) -> ApiResult<&'a PaymasterClient> {
    match state.paymaster.as_deref() {
        Some(client) => Ok(client),
        None => {
            state.metrics.inc_paymaster_call(method, "not_configured");
            Err(ApiError::internal(API_KEY_MISSING))
        }
    }
}

fn record<T>(state: &ApiState, method: &str, result: &Result<T, votesprout_core::VoteSproutError>) {
    state.metrics.inc_paymaster_call(method, if result.is_ok() { "ok" } else { "error" });
}

/// `{userOperation, entryPoint}` -> sponsorship fields from `pm_sponsorUserOperation`, verbatim.
pub async fn sponsor(State(state): State<Arc<ApiState>>, body: Bytes) -> ApiResult<Json<Value>> {
    let (user_operation, entry_point) = user_operation_args(&body)?;
    let paymaster = client(&state, "sponsor")?;
    let result = paymaster.sponsor(user_operation, entry_point).await;
    record(&state, "sponsor", &result);
    Ok(Json(result?))
}

/// `{userOperation, entryPoint}` -> `{userOpHash}` from `eth_sendUserOperation`.
pub async fn send(State(state): State<Arc<ApiState>>, body: Bytes) -> ApiResult<Json<Value>> {
    let (user_operation, entry_point) = user_operation_args(&body)?;
    let paymaster = client(&state, "send")?;
    let result = paymaster.send(user_operation, entry_point).await;
    record(&state, "send", &result);
    Ok(Json(json!({ "userOpHash": result? })))
}

/// `{userOpHash}` -> `{receipt}`, polling until the bundler knows the receipt or attempts run out.
pub async fn receipt(State(state): State<Arc<ApiState>>, body: Bytes) -> ApiResult<Json<Value>> {
    let request: ReceiptRequest = parse_json_body(&body)?;
    let user_op_hash = match request.user_op_hash {
        Some(Value::String(hash)) if !hash.is_empty() => hash,
        Some(other) if !is_missing(Some(&other)) => other.to_string(),
        _ => return Err(ApiError::bad_request("Missing userOpHash")),
    };
    let paymaster = client(&state, "receipt")?;
    let result = paymaster.poll_receipt(&user_op_hash).await;
    match &result {
        Ok(Some(_)) => state.metrics.inc_paymaster_call("receipt", "ok"),
        Ok(None) => state.metrics.inc_paymaster_call("receipt", "pending"),
        Err(_) => state.metrics.inc_paymaster_call("receipt", "error"),
    }
    Ok(Json(json!({ "receipt": result? })))
}
