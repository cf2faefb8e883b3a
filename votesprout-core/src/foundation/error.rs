use crate::foundation::DUPLICATE_VOTE_MESSAGE;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Validation,
    DuplicateVote,
    NotFound,
    ConfigError,
    RemoteService,
    SponsorshipFailed,
    SubmissionFailed,
    StorageError,
    SerializationError,
    NetworkError,
    SigningFailed,
    EncodingError,
    InvalidStateTransition,
    Message,
}

#[derive(Debug, Error)]
pub enum VoteSproutError {
    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{}", DUPLICATE_VOTE_MESSAGE)]
    DuplicateVote { proposal_id: i64, voter: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: i64 },

    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Error reported by a remote JSON-RPC service. `message` is the remote text, passed through as-is.
    #[error("{message}")]
    RemoteService { method: String, code: Option<i64>, message: String },

    #[error("sponsorship failed: {0}")]
    SponsorshipFailed(String),

    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    #[error("storage error during {operation}: {details}")]
    StorageError { operation: String, details: String },

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, VoteSproutError>;

impl VoteSproutError {
    pub fn code(&self) -> ErrorCode {
        match self {
            VoteSproutError::Validation { .. } => ErrorCode::Validation,
            VoteSproutError::DuplicateVote { .. } => ErrorCode::DuplicateVote,
            VoteSproutError::NotFound { .. } => ErrorCode::NotFound,
            VoteSproutError::ConfigError(_) => ErrorCode::ConfigError,
            VoteSproutError::RemoteService { .. } => ErrorCode::RemoteService,
            VoteSproutError::SponsorshipFailed(_) => ErrorCode::SponsorshipFailed,
            VoteSproutError::SubmissionFailed(_) => ErrorCode::SubmissionFailed,
            VoteSproutError::StorageError { .. } => ErrorCode::StorageError,
            VoteSproutError::SerializationError { .. } => ErrorCode::SerializationError,
            VoteSproutError::NetworkError(_) => ErrorCode::NetworkError,
            VoteSproutError::SigningFailed(_) => ErrorCode::SigningFailed,
            VoteSproutError::EncodingError(_) => ErrorCode::EncodingError,
            VoteSproutError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            VoteSproutError::Message(_) => ErrorCode::Message,
        }
    }

    /// Errors caused by the caller's input rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self.code(), ErrorCode::Validation | ErrorCode::DuplicateVote | ErrorCode::NotFound)
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        VoteSproutError::Validation { field: field.into(), reason: reason.into() }
    }

    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        VoteSproutError::NotFound { entity: entity.into(), id }
    }

    pub fn remote(method: impl Into<String>, code: Option<i64>, message: impl Into<String>) -> Self {
        VoteSproutError::RemoteService { method: method.into(), code, message: message.into() }
    }
}

#[macro_export]
macro_rules! storage_err {
    ($op:expr, $err:expr) => {
        $crate::foundation::VoteSproutError::StorageError { operation: $op.into(), details: $err.to_string() }
    };
}

impl From<io::Error> for VoteSproutError {
    fn from(err: io::Error) -> Self {
        VoteSproutError::StorageError { operation: "io".to_string(), details: err.to_string() }
    }
}

impl From<serde_json::Error> for VoteSproutError {
    fn from(err: serde_json::Error) -> Self {
        VoteSproutError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}

impl From<sqlx::Error> for VoteSproutError {
    fn from(err: sqlx::Error) -> Self {
        VoteSproutError::StorageError { operation: "postgres".to_string(), details: err.to_string() }
    }
}

impl From<reqwest::Error> for VoteSproutError {
    fn from(err: reqwest::Error) -> Self {
        VoteSproutError::NetworkError(err.to_string())
    }
}

// NOTE: Avoid adding generic "stringly" error conversions here.
// Use structured `VoteSproutError` variants at the call site to preserve context.
