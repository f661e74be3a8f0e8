//! Error handling - translates domain and repository failures into HTTP
//! responses with small HTML error pages.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};

use crate::views;

/// Application-level error type for the HTTP layer.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            AppError::NotFound(detail)
            | AppError::BadRequest(detail)
            | AppError::Conflict(detail) => detail.clone(),
            AppError::Internal(detail) => {
                // Log the detail, never leak it to the client.
                tracing::error!("Internal error: {}", detail);
                "something went wrong".to_string()
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(views::error_page(self.status_code(), &detail))
    }
}

// Conversion from domain errors
impl From<blogly_core::error::DomainError> for AppError {
    fn from(err: blogly_core::error::DomainError) -> Self {
        match err {
            blogly_core::error::DomainError::NotFound { entity, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity, id))
            }
            blogly_core::error::DomainError::Validation(msg) => AppError::BadRequest(msg),
            blogly_core::error::DomainError::Duplicate(msg) => AppError::Conflict(msg),
            blogly_core::error::DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<blogly_core::error::RepoError> for AppError {
    fn from(err: blogly_core::error::RepoError) -> Self {
        match err {
            blogly_core::error::RepoError::NotFound => {
                AppError::NotFound("resource not found".to_string())
            }
            blogly_core::error::RepoError::Constraint(msg) => AppError::Conflict(msg),
            blogly_core::error::RepoError::Connection(msg)
            | blogly_core::error::RepoError::Query(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
