//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::IdentityId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::identity::IdentitySummary;

// ============================================================================
// Sign In / Refresh
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Token pair response for sign-in and refresh
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub message: &'static str,
    pub access_token: String,
    pub refresh_token: String,
}

// ============================================================================
// Provisioning
// ============================================================================

/// Create sub-admin / user request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIdentityRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateIdentityResponse {
    pub message: &'static str,
    pub user_id: IdentityId,
}

/// Listing entry; the password digest never leaves the server
#[derive(Debug, Clone, Serialize)]
pub struct IdentityResponse {
    pub id: IdentityId,
    pub username: String,
    pub email: String,
    pub created_by: Option<IdentityId>,
    pub created_at: DateTime<Utc>,
}

impl From<IdentitySummary> for IdentityResponse {
    fn from(summary: IdentitySummary) -> Self {
        Self {
            id: summary.id,
            username: summary.username,
            email: summary.email,
            created_by: summary.created_by,
            created_at: summary.created_at,
        }
    }
}
