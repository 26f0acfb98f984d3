//! Mapping of handler failures to HTTP responses.
//!
//! # Design Decisions
//! - Plain text bodies, short lowercase messages
//! - Storage failures are logged and surface as a generic 500

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("gone")]
    Gone,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid content")]
    InvalidContent,
    #[error("invalid ttl")]
    InvalidTtl,
    #[error("bad form")]
    BadForm,
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("no password")]
    NoPassword,
    #[error("db error")]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Gone => StatusCode::GONE,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::InvalidContent
            | ApiError::InvalidTtl
            | ApiError::BadForm
            | ApiError::NoPassword => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            if let ApiError::Storage(e) = &self {
                tracing::error!(error = %e, "Storage failure");
            }
        }
        let message = match &self {
            ApiError::Storage(StorageError::NotFound(_)) => "not found".to_string(),
            other => other.to_string(),
        };
        (status, message).into_response()
    }
}
