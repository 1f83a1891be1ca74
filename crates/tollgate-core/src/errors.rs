//! Error types shared by every Tollgate crate.
//!
//! - [`AuthError`]: the failure kinds of the credential subsystem. Token
//!   issuance, token validation and the credential check all return it.
//! - [`AppError`]: the HTTP error envelope returned by handlers. Any error
//!   converts into it with `?`; an [`AuthError`] keeps its mapped status code,
//!   everything else becomes a 500.
//!
//! Server errors never expose their detail to the client. The full error is
//! logged and the response body carries a generic message.

use std::fmt;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// Why a token was rejected.
///
/// Callers that only care about "valid or not" can ignore this tag; the
/// user-facing message of [`AuthError::TokenInvalid`] is identical for every
/// reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// `exp` is not strictly in the future.
    Expired,
    /// Signature does not verify against the public key.
    BadSignature,
    /// Not a well-formed token (segments, base64, JSON, required claims).
    Malformed,
    /// Header algorithm differs from the configured one.
    AlgorithmMismatch,
    /// Token kind differs from the one the caller required.
    WrongKind,
    /// Rejected by the configured token guard.
    Revoked,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::Expired => "expired",
            InvalidReason::BadSignature => "bad_signature",
            InvalidReason::Malformed => "malformed",
            InvalidReason::AlgorithmMismatch => "algorithm_mismatch",
            InvalidReason::WrongKind => "wrong_kind",
            InvalidReason::Revoked => "revoked",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure kinds of token issuance, token validation and credential checks.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Signing or verification key could not be read or parsed.
    #[error("key material unavailable: {0}")]
    KeyUnavailable(String),

    /// The cryptographic signing operation failed.
    #[error("failed to sign token: {0}")]
    SigningError(String),

    /// Signature mismatch, structural corruption or expiry.
    #[error("Invalid or expired token")]
    TokenInvalid { reason: Option<InvalidReason> },

    /// No token was presented where one is required.
    #[error("Couldn't find {0} in request")]
    MissingCredential(String),

    /// Password verification failed.
    #[error("Wrong password for user {0}")]
    CredentialMismatch(String),

    /// Unknown identity at lookup time.
    #[error("{0}")]
    NotFound(String),

    /// Caller passed a non-positive expiry or an empty claim.
    #[error("invalid token request: {0}")]
    InvalidInput(String),

    /// Anything not classified above, such as a panicked or cancelled
    /// blocking task running a token or password operation.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AuthError {
    pub fn unexpected(err: impl fmt::Display) -> Self {
        AuthError::Unexpected(err.to_string())
    }

    pub fn token_invalid(reason: InvalidReason) -> Self {
        AuthError::TokenInvalid {
            reason: Some(reason),
        }
    }

    /// The reason tag of a [`AuthError::TokenInvalid`], if any.
    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            AuthError::TokenInvalid { reason } => *reason,
            _ => None,
        }
    }

    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::KeyUnavailable(_) => "key_unavailable",
            AuthError::SigningError(_) => "signing_error",
            AuthError::TokenInvalid { .. } => "token_invalid",
            AuthError::MissingCredential(_) => "missing_credential",
            AuthError::CredentialMismatch(_) => "credential_mismatch",
            AuthError::NotFound(_) => "not_found",
            AuthError::InvalidInput(_) => "invalid_input",
            AuthError::Unexpected(_) => "unexpected",
        }
    }

    /// HTTP status for this failure.
    ///
    /// Signing failures answer 500, not 400: a key that cannot sign is a
    /// server fault, whatever the request carried.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::TokenInvalid { .. }
            | AuthError::MissingCredential(_)
            | AuthError::CredentialMismatch(_) => StatusCode::BAD_REQUEST,
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthError::KeyUnavailable(_)
            | AuthError::SigningError(_)
            | AuthError::InvalidInput(_)
            | AuthError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    /// Wraps an error, taking the status from an [`AuthError`] when the error
    /// is one and falling back to 500 otherwise.
    pub fn classify<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        let error = err.into();
        let status = error
            .downcast_ref::<AuthError>()
            .map(AuthError::status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, error }
    }

    /// The [`AuthError`] behind this error, if there is one.
    pub fn auth_error(&self) -> Option<&AuthError> {
        self.error.downcast_ref::<AuthError>()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "error": message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::classify(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            AuthError::token_invalid(InvalidReason::Expired).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::MissingCredential("refresh_token".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::CredentialMismatch("alice".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::NotFound("no such user".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AuthError::KeyUnavailable("missing".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::SigningError("bad key".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::Unexpected("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_token_invalid_message_is_collapsed() {
        let expired = AuthError::token_invalid(InvalidReason::Expired);
        let malformed = AuthError::token_invalid(InvalidReason::Malformed);
        let untagged = AuthError::TokenInvalid { reason: None };

        assert_eq!(expired.to_string(), malformed.to_string());
        assert_eq!(expired.to_string(), untagged.to_string());
        assert_eq!(expired.reason(), Some(InvalidReason::Expired));
        assert_eq!(untagged.reason(), None);
    }

    #[test]
    fn test_classify_keeps_auth_status() {
        let err: AppError = AuthError::NotFound("gone".into()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(matches!(err.auth_error(), Some(AuthError::NotFound(_))));

        let err: AppError = anyhow!("database exploded").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.auth_error().is_none());
    }

    #[test]
    fn test_explicit_constructors() {
        assert_eq!(
            AppError::bad_request(anyhow!("x")).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized(anyhow!("x")).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::unprocessable(anyhow!("x")).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_unexpected_is_server_error() {
        let err = AuthError::unexpected("task 7 panicked");
        assert!(matches!(&err, AuthError::Unexpected(m) if m == "task 7 panicked"));
        assert_eq!(err.kind(), "unexpected");

        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(
            AuthError::token_invalid(InvalidReason::WrongKind).kind(),
            "token_invalid"
        );
        assert_eq!(InvalidReason::WrongKind.to_string(), "wrong_kind");
        assert_eq!(
            AuthError::MissingCredential("x".into()).kind(),
            "missing_credential"
        );
    }
}
