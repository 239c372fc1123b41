//! Bearer credential extraction
//!
//! Parses `Authorization: Bearer <token>`. The header value is split once on
//! `"Bearer "`; anything other than an empty prefix followed by a non-empty
//! token is malformed.

use http::{HeaderMap, header};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("missing Authorization header")]
    Missing,

    #[error("invalid Authorization format")]
    Malformed,
}

/// Extract the bearer token from request headers.
///
/// ```rust
/// use http::{HeaderMap, HeaderValue, header};
/// use platform::bearer::extract_bearer;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
/// assert_eq!(extract_bearer(&headers).unwrap(), "abc");
/// ```
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?;
    let value = value.to_str().map_err(|_| BearerError::Malformed)?;
    if value.is_empty() {
        return Err(BearerError::Missing);
    }

    match value.split_once(BEARER_PREFIX) {
        Some(("", token)) if !token.is_empty() && !token.contains(BEARER_PREFIX) => Ok(token),
        _ => Err(BearerError::Malformed),
    }
}
