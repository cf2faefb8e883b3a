use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, error};
use serde::de::DeserializeOwned;
use serde_json::json;
use votesprout_core::foundation::{ErrorCode, VoteSproutError};

/// Error reply of every route: `{"error": "<message>"}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into() }
    }
}

impl From<VoteSproutError> for ApiError {
    fn from(err: VoteSproutError) -> Self {
        let status = match err.code() {
            ErrorCode::Validation | ErrorCode::DuplicateVote => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if err.is_client_error() {
            debug!("request rejected code={:?} error={}", err.code(), err);
        } else {
            error!("request failed code={:?} error={}", err.code(), err);
        }
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Decode a JSON body regardless of content type; anything unreadable is a 400.
pub fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|err| ApiError::bad_request(format!("invalid JSON body: {err}")))
}

/// Numeric path segment, or a 400.
pub fn parse_id(raw: &str, what: &str) -> ApiResult<i64> {
    raw.trim().parse().map_err(|_| ApiError::bad_request(format!("invalid {what} id: {raw}")))
}

pub fn created<T: serde::Serialize>(body: T) -> Response {
    (StatusCode::CREATED, Json(body)).into_response()
}
