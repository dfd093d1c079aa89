use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{CallableErrorBody, CallableErrorDetail};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors a callable function can answer with
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Function not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// Canonical status name carried in the error body
    pub fn status_name(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidArgument(_) => "INVALID_ARGUMENT",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(CallableErrorBody {
            error: CallableErrorDetail {
                status: self.status_name().to_string(),
                message: self.to_string(),
            },
        });

        (self.status_code(), body).into_response()
    }
}
