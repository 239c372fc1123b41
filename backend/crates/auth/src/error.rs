//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Public messages are fixed strings. Server-side failures render a generic
//! message; details only go to the log.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use platform::bearer::BearerError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email, wrong password, or missing required role at sign-in
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Bad signature, malformed token, expired, consumed or unknown refresh token
    #[error("invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("missing Authorization header")]
    MissingAuthorization,

    #[error("invalid Authorization format")]
    MalformedAuthorization,

    /// Authenticated caller without any role
    #[error("Forbidden: no roles in token")]
    NoRoles,

    /// Caller's roles do not intersect the route's requirement
    #[error("Forbidden: insufficient permissions")]
    Forbidden,

    #[error("Email already exists")]
    EmailTaken,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::InvalidOrExpiredToken
            | AuthError::MissingAuthorization
            | AuthError::MalformedAuthorization => ErrorKind::Unauthorized,
            AuthError::NoRoles | AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Database(e) => match sqlx_error_kind(e) {
                ErrorKind::ServiceUnavailable => ErrorKind::ServiceUnavailable,
                _ => ErrorKind::InternalServerError,
            },
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => AppError::internal("internal server error"),
            ErrorKind::ServiceUnavailable => AppError::service_unavailable("service unavailable"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            AuthError::NoRoles | AuthError::Forbidden => {
                tracing::warn!(error = %self, "Authorization denied");
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

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::Missing => AuthError::MissingAuthorization,
            BearerError::Malformed => AuthError::MalformedAuthorization,
        }
    }
}
