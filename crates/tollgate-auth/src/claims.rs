//! Claim and token structures.
//!
//! - [`IdentityClaim`]: who the token speaks for; copied into every token
//! - [`TokenKind`]: `access` or `refresh`
//! - [`TokenPayload`]: the signed JSON body of a token
//! - [`IssuedToken`] / [`TokenPair`]: what the issuer hands back
//!
//! # Wire format
//!
//! ```text
//! { "id": "u1", ...extra claim fields, "kind": "access", "iat": 1700000000, "exp": 1700000900, "jti": "…" }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tollgate_core::{AuthError, InvalidReason};
use utoipa::ToSchema;

/// Payload keys owned by the token itself. Identity claims may not use them
/// as extra fields.
pub const RESERVED_CLAIMS: [&str; 5] = ["id", "kind", "iat", "exp", "jti"];

/// Label shared by every issued token pair.
pub const TOKEN_TYPE_BEARER: &str = "bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity a token speaks for.
///
/// Always carries a stable `id`; any further fields are opaque to the token
/// machinery and round-trip unchanged. The claim holds no secrets and cannot
/// be changed once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaim {
    id: String,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl IdentityClaim {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Adds an extra claim field. Reserved payload keys are refused.
    pub fn with(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, AuthError> {
        let key = key.into();
        if RESERVED_CLAIMS.contains(&key.as_str()) {
            return Err(AuthError::InvalidInput(format!(
                "claim field `{}` is reserved",
                key
            )));
        }
        self.extra.insert(key, value.into());
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub(crate) fn validate(&self) -> Result<(), AuthError> {
        if self.id.trim().is_empty() {
            return Err(AuthError::InvalidInput(
                "identity claim must carry a non-empty id".to_string(),
            ));
        }
        if let Some(key) = self
            .extra
            .keys()
            .find(|key| RESERVED_CLAIMS.contains(&key.as_str()))
        {
            return Err(AuthError::InvalidInput(format!(
                "claim field `{}` is reserved",
                key
            )));
        }
        Ok(())
    }
}

/// Signed body of a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(flatten)]
    pub claim: IdentityClaim,
    pub kind: TokenKind,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

impl TokenPayload {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// Rejects the payload unless it is of the `expected` kind.
    pub fn expect_kind(self, expected: TokenKind) -> Result<Self, AuthError> {
        if self.kind != expected {
            tracing::debug!(expected = %expected, actual = %self.kind, "Token kind mismatch");
            return Err(AuthError::token_invalid(InvalidReason::WrongKind));
        }
        Ok(self)
    }
}

/// One minted token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub kind: TokenKind,
    pub expires_at: DateTime<Utc>,
}

/// Result of an issuance: access and refresh token for the same identity.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}
