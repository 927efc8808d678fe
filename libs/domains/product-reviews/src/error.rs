use axum::response::{IntoResponse, Response};
use jsonapi::{ErrorCode, RestResponse};
use thiserror::Error;

/// Infrastructure faults raised by backend clients.
///
/// Business outcomes (missing SKU, unknown product, rejected submission) are
/// response values, never errors; this type covers transport and payload
/// failures only.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("storage request failed: {0}")]
    Storage(String),

    #[error("search request failed: {0}")]
    Search(String),

    #[error("review submission request failed: {0}")]
    Submission(String),

    #[error("malformed payload from {origin}: {details}")]
    Malformed {
        origin: &'static str,
        details: String,
    },
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<redis::RedisError> for ClientError {
    fn from(err: redis::RedisError) -> Self {
        ClientError::Storage(err.to_string())
    }
}

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        tracing::error!("Backend client failure: {}", self);
        let code = match self {
            ClientError::Malformed { .. } => ErrorCode::InternalError,
            _ => ErrorCode::UpstreamUnavailable,
        };
        RestResponse::error(code).into_response()
    }
}
