//! Restaurant Error Types
//!
//! Restaurant-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

/// Restaurant-specific result type alias
pub type RestaurantResult<T> = Result<T, RestaurantError>;

#[derive(Debug, Error)]
pub enum RestaurantError {
    /// Rejected input, message is shown to the client
    #[error("{0}")]
    Validation(String),

    /// Missing or archived restaurant
    #[error("Restaurant not found")]
    RestaurantNotFound,

    /// Missing address, or one owned by someone else
    #[error("Address not found")]
    AddressNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RestaurantError {
    pub fn validation(message: impl Into<String>) -> Self {
        RestaurantError::Validation(message.into())
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestaurantError::Validation(_) => ErrorKind::BadRequest,
            RestaurantError::RestaurantNotFound | RestaurantError::AddressNotFound => {
                ErrorKind::NotFound
            }
            RestaurantError::Database(e) => match sqlx_error_kind(e) {
                ErrorKind::ServiceUnavailable => ErrorKind::ServiceUnavailable,
                _ => ErrorKind::InternalServerError,
            },
        }
    }

    /// Convert to AppError. Server-side failures get a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => AppError::internal("internal server error"),
            ErrorKind::ServiceUnavailable => AppError::service_unavailable("service unavailable"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            RestaurantError::Database(e) => {
                tracing::error!(error = %e, "Restaurant database error");
            }
            _ => {
                tracing::debug!(error = %self, "Restaurant error");
            }
        }
    }
}

impl From<RestaurantError> for AppError {
    fn from(err: RestaurantError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for RestaurantError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
