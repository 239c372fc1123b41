//! Request extractors
//!
//! Drop-in replacements for axum extractors whose rejections would otherwise
//! echo serde internals back to the client.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

use crate::error::app_error::AppError;

/// JSON body extractor. Any body that fails to parse or deserialize is a
/// 400 `invalid request body`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(_: JsonRejection) -> Self {
        AppError::bad_request("invalid request body")
    }
}
