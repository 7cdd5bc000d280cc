//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Reasons a Telegram `initData` string is rejected
///
/// Messages are shown to the Mini App as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitDataError {
    #[error("initData is empty")]
    Empty,

    #[error("hash is missing in initData")]
    HashMissing,

    #[error("Invalid initData hash")]
    HashMismatch,

    #[error("auth_date is missing")]
    AuthDateMissing,

    #[error("initData expired")]
    Expired,

    #[error("user is missing in initData")]
    UserMissing,

    #[error("Cannot parse user from initData")]
    UserUnparseable,

    #[error("Invalid telegram user id")]
    InvalidUserId,

    /// Query string could not be decoded
    #[error("Malformed initData")]
    Malformed,
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Cookie missing, tampered, or unparseable
    #[error("Session is invalid")]
    SessionInvalid,

    /// Signature fine but older than the TTL
    #[error("Session expired")]
    SessionExpired,

    #[error(transparent)]
    InitData(#[from] InitDataError),

    /// Telegram login attempted without a configured bot token
    #[error("Server has no TELEGRAM_BOT_TOKEN configured")]
    BotTokenMissing,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::SessionInvalid | AuthError::SessionExpired => StatusCode::UNAUTHORIZED,
            AuthError::InitData(_) => StatusCode::UNAUTHORIZED,
            AuthError::BotTokenMissing | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::SessionInvalid | AuthError::SessionExpired | AuthError::InitData(_) => {
                ErrorKind::Unauthorized
            }
            AuthError::BotTokenMissing | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::BotTokenMissing => {
                tracing::error!("Telegram login attempted without a bot token");
            }
            AuthError::InitData(InitDataError::HashMismatch) => {
                tracing::warn!("initData signature mismatch");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_data_messages_pass_through() {
        let err = AuthError::from(InitDataError::HashMismatch);
        assert_eq!(err.to_string(), "Invalid initData hash");
        assert_eq!(err.to_app_error().message(), "Invalid initData hash");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_missing_bot_token_is_server_error() {
        let err = AuthError::BotTokenMissing;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.kind().is_server_error());
    }
}
