//! Error handling - maps failures to the JSON bodies the API promises.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use inbrief_core::error::RepoError;
use inbrief_core::ports::UploadError;
use inbrief_core::DomainError;
use inbrief_shared::{ApiFailure, ErrorResponse};

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A route matched but the post does not exist (or is unpublished).
    #[error("Post not found")]
    PostNotFound,

    /// No route matched.
    #[error("Endpoint not found")]
    EndpointNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    /// The store could not be queried; the cause is shown to the caller.
    #[error("{0}")]
    Store(String),

    /// Anything else; details are logged, not returned.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::PostNotFound | AppError::EndpointNotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upload(_) | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::PostNotFound => response.json(ErrorResponse::post_not_found()),
            AppError::EndpointNotFound => response.json(ErrorResponse::endpoint_not_found()),
            AppError::BadRequest(_) | AppError::Upload(_) => {
                response.json(ApiFailure::new(self.to_string()))
            }
            AppError::Store(detail) => {
                tracing::error!("Database error: {}", detail);
                response.json(ApiFailure::new(detail.clone()))
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                response.json(ErrorResponse::internal_error())
            }
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::PostNotFound,
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Store(repo) => repo.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::PostNotFound,
            other => AppError::Store(other.to_string()),
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::Upload(err.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(format!("template rendering failed: {err}"))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
