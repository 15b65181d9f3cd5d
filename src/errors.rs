use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use inventory::InventoryError;
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;

/// Error kinds surfaced by the API, each mapped to a fixed status code and
/// `code` string in the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InsufficientStock(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InsufficientStock(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Validation(_) => "VALIDATION",
            ApiError::InsufficientStock(_) => "INSUFFICIENT_STOCK",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(msg) => error!("Internal error: {}", msg),
            other => warn!("Request failed with {}: {}", other.code(), other),
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            success: false,
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<DbErr> for ApiError {
    fn from(db_error: DbErr) -> Self {
        // Unique-constraint violations surface as conflicts; everything else
        // from the store is a generic internal error.
        let message = db_error.to_string();
        let lowered = message.to_lowercase();
        if lowered.contains("unique") || lowered.contains("duplicate key") {
            ApiError::Conflict("Resource already exists".to_string())
        } else {
            ApiError::Internal(message)
        }
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::ProductNotFound(_) => ApiError::NotFound(err.to_string()),
            InventoryError::InsufficientStock { .. } => {
                ApiError::InsufficientStock(err.to_string())
            }
            InventoryError::NegativeDelta(_) => ApiError::Validation(err.to_string()),
            InventoryError::Database(db_error) => ApiError::from(db_error),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}
