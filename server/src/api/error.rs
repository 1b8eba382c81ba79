use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use headerproof_store::StoreError;
use headerproof_types::ErrorResponse;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    NotFound(String),
    InvalidInput(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::NotFound(e) | AppError::InvalidInput(e) | AppError::Internal(e) => e,
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::HeaderNotFound(_)
            | StoreError::TreeNotFound(_)
            | StoreError::Proof(_) => AppError::NotFound(err.to_string()),
            StoreError::InvalidInput(_) => AppError::InvalidInput(err.to_string()),
            StoreError::BatchMismatch { .. }
            | StoreError::Encoding(_)
            | StoreError::LockPoisoned => AppError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
