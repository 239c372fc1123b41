//! Error conversions - From implementations for infrastructure error types
//!
//! Provides conversion from `sqlx` errors and into `axum` responses.
//! Both are feature-gated so the domain layer can depend on the kernel
//! without pulling in the database driver or the web framework.

#[cfg(feature = "sqlx")]
use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a database error without consuming it.
///
/// Domain error enums that wrap `sqlx::Error` use this to choose their
/// status code while keeping the original error for logging.
#[cfg(feature = "sqlx")]
pub fn sqlx_error_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::ServiceUnavailable
        }
        sqlx::Error::Database(db_err) => {
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match db_err.code().as_deref() {
                // Class 23 - Integrity Constraint Violation
                Some("23505") => ErrorKind::Conflict,
                Some("23503") => ErrorKind::NotFound,
                Some("23502" | "23514") => ErrorKind::BadRequest,
                // Class 53 - Insufficient Resources, Class 57 - Operator Intervention
                Some("53000" | "53100" | "53200" | "53300") => ErrorKind::ServiceUnavailable,
                Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                    ErrorKind::ServiceUnavailable
                }
                _ => ErrorKind::InternalServerError,
            }
        }
        _ => ErrorKind::InternalServerError,
    }
}

/// Returns true for Postgres `unique_violation` (23505).
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let kind = sqlx_error_kind(&err);
        let message = match kind {
            ErrorKind::NotFound => "record not found",
            ErrorKind::Conflict => "duplicate key value",
            ErrorKind::BadRequest => "constraint violation",
            ErrorKind::ServiceUnavailable => "service unavailable",
            _ => "internal server error",
        };
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// Errors render as a plain-text body carrying only the public message.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, self.message().to_owned()).into_response()
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_service_unavailable() {
        let app_err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(app_err.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(app_err.status_code(), 503);
    }

    #[test]
    fn test_row_not_found_is_not_found() {
        assert_eq!(
            sqlx_error_kind(&sqlx::Error::RowNotFound),
            ErrorKind::NotFound
        );
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn test_unknown_errors_are_internal_with_generic_message() {
        let app_err: AppError = sqlx::Error::Protocol("unexpected packet".into()).into();
        assert_eq!(app_err.kind(), ErrorKind::InternalServerError);
        assert_eq!(app_err.message(), "internal server error");
    }
}
