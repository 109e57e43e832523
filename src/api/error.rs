//! Error types with HTTP status mapping.
//!
//! `ApiError` answers JSON clients under `/api`; `PageError` answers the
//! browser with an HTML page. Internal details are logged, never shown.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::registration::RegistryError;
use crate::store::StoreError;
use crate::views::error_page;

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const NOT_FOUND_MESSAGE: &str = "No such record";

// ═══════════════════════════════════════════════════════════
// JSON errors
// ═══════════════════════════════════════════════════════════

/// Structured error response body for JSON clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

// ═══════════════════════════════════════════════════════════
// HTML errors
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            PageError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "Invalid request", detail.clone()),
            PageError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                NOT_FOUND_MESSAGE,
                format!("{NOT_FOUND_MESSAGE}: {id}"),
            ),
            PageError::Internal(detail) => {
                tracing::error!(detail, "Page internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    format!("{INTERNAL_MESSAGE}. Nothing was saved."),
                )
            }
        };
        (status, Html(error_page(title, &message))).into_response()
    }
}

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => PageError::NotFound(id),
            other => PageError::Internal(other.to_string()),
        }
    }
}

impl From<RegistryError> for PageError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(v) => PageError::BadRequest(v.user_message()),
            RegistryError::NotFound { id, .. } => PageError::NotFound(id),
            RegistryError::Storage(e) => PageError::Internal(e.to_string()),
        }
    }
}
