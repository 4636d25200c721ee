//! `{success, data | error}` envelopes returned by the content API.

use super::uploads::UploadError;
use crate::content_store::validation::ValidationError;
use crate::content_store::StoreError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure of a content API handler, rendered as `{success: false, error}`.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Internal(String),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::Conflict(_) => StatusCode::CONFLICT,
            HandlerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            HandlerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (
            status,
            Json(json!({ "success": false, "error": self.to_string() })),
        )
            .into_response()
    }
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateSlug { .. } => HandlerError::Conflict(err.to_string()),
            StoreError::NotFound { .. } => HandlerError::NotFound(err.to_string()),
            StoreError::Serialization(_) | StoreError::Database(_) => {
                HandlerError::Internal(err.to_string())
            }
        }
    }
}

impl From<ValidationError> for HandlerError {
    fn from(err: ValidationError) -> Self {
        HandlerError::BadRequest(err.to_string())
    }
}

impl From<UploadError> for HandlerError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Io(_) => HandlerError::Internal(err.to_string()),
            UploadError::NotAnImage(_) => HandlerError::BadRequest(err.to_string()),
            UploadError::FileTooLarge(..) => HandlerError::PayloadTooLarge(err.to_string()),
        }
    }
}

impl From<MultipartError> for HandlerError {
    fn from(err: MultipartError) -> Self {
        let message = format!("Invalid multipart body: {}", err.body_text());
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            HandlerError::PayloadTooLarge(message)
        } else {
            HandlerError::BadRequest(message)
        }
    }
}

pub type HandlerResult = Result<Response, HandlerError>;

/// `{success: true, data}` with the given status.
pub fn data_response<T: Serialize>(status: StatusCode, data: T) -> HandlerResult {
    Ok((status, Json(json!({ "success": true, "data": data }))).into_response())
}
