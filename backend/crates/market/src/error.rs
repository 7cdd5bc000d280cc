//! Market Error Types
//!
//! This module provides marketplace error variants that integrate
//! with the unified `kernel::error::AppError` system. Messages reach the
//! Mini App verbatim in the `error` field.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Market-specific result type alias
pub type MarketResult<T> = Result<T, MarketError>;

/// Market-specific error variants
#[derive(Debug, Error)]
pub enum MarketError {
    /// No valid session cookie
    #[error("Unauthorized")]
    Unauthorized,

    /// Caller lacks the role or does not own the record
    #[error("{0}")]
    Forbidden(String),

    /// Referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Duplicate Telegram account
    #[error("{0}")]
    Conflict(String),

    /// Request failed validation
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        MarketError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        MarketError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        MarketError::Conflict(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        MarketError::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketError::Unauthorized => StatusCode::UNAUTHORIZED,
            MarketError::Forbidden(_) => StatusCode::FORBIDDEN,
            MarketError::NotFound(_) => StatusCode::NOT_FOUND,
            MarketError::Conflict(_) => StatusCode::CONFLICT,
            MarketError::Validation(_) => StatusCode::BAD_REQUEST,
            MarketError::Auth(e) => e.status_code(),
            MarketError::Database(e) => StatusCode::from_u16(AppError::from_sqlx(e).status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            MarketError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::Unauthorized => ErrorKind::Unauthorized,
            MarketError::Forbidden(_) => ErrorKind::Forbidden,
            MarketError::NotFound(_) => ErrorKind::NotFound,
            MarketError::Conflict(_) => ErrorKind::Conflict,
            MarketError::Validation(_) => ErrorKind::BadRequest,
            MarketError::Auth(e) => e.kind(),
            MarketError::Database(e) => AppError::from_sqlx(e).kind(),
            MarketError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Storage failures are reported by SQLSTATE class, without driver details.
    pub fn to_app_error(&self) -> AppError {
        match self {
            MarketError::Auth(e) => e.to_app_error(),
            MarketError::Database(e) => AppError::from_sqlx(e),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            MarketError::Internal(msg) => {
                tracing::error!(message = %msg, "Market internal error");
            }
            MarketError::Forbidden(msg) => {
                tracing::warn!(message = %msg, "Market access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Market error");
            }
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        match self {
            MarketError::Auth(e) => e.into_response(),
            MarketError::Database(e) => {
                tracing::error!(error = %e, "Market database error");
                AppError::from(e).into_response()
            }
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}
