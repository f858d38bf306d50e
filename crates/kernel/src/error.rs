//! Application error types.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use muse_sdk::types::ApiResponse;
use thiserror::Error;

use crate::store::StoreError;

/// Application errors.
///
/// Every variant renders as the standard `{success: false, error}` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),
}

impl AppError {
    pub fn not_found() -> Self {
        Self::NotFound("not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => AppError::NotFound(err.to_string()),
            StoreError::DuplicateKey { .. } => AppError::Conflict(err.to_string()),
            StoreError::VersionMismatch { expected, actual } => AppError::Conflict(format!(
                "Conflict: stale data (current version {expected}, submitted {actual}). Please refresh."
            )),
            StoreError::InvalidCursor | StoreError::Invalid(_) => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details are logged, never returned
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_mismatch_maps_to_conflict() {
        let err: AppError = StoreError::VersionMismatch {
            expected: 2,
            actual: 1,
        }
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert!(err.to_string().starts_with("Conflict"));
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err: AppError = StoreError::DuplicateKey {
            entity: "media",
            id: "m1".into(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_cursor_maps_to_bad_request() {
        let err: AppError = StoreError::InvalidCursor.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_error_is_vague() {
        let err = AppError::Internal(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.to_string(), "internal server error");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
