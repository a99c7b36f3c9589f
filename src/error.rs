use axum::extract::rejection::BytesRejection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),
    #[error("failed to decode JSON object: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Outcome of a `/bfhl` request that did not succeed. Both variants are still
/// answered with HTTP 200; only the body tells them apart.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid payload: \"data\" should be an array")]
    InvalidPayload,
    #[error("Unexpected error")]
    Unexpected(#[from] ServiceError),
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Unexpected(ServiceError::MalformedBody(err))
    }
}

impl From<BytesRejection> for RequestError {
    fn from(err: BytesRejection) -> Self {
        RequestError::Unexpected(ServiceError::Body(err))
    }
}
