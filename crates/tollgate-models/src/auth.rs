//! Request and response bodies of the `/users/auth` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of a successful login or refresh.
///
/// The refresh token never appears here; it travels only in the
/// HTTP-only cookie.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub access_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub detail: String,
    pub success: bool,
}

impl MessageResponse {
    pub fn ok(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            success: true,
        }
    }
}

/// Shape of every error body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid or expired token")]
    pub error: String,
}
