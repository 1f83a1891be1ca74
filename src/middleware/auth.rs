use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
};
use tollgate_auth::{TokenKind, TokenPayload};
use tollgate_core::{AppError, AuthError, InvalidReason};
use tollgate_models::UserId;
use tollgate_observability::track_token_validation;

use crate::state::AppState;

/// Authenticated caller, taken from an `Authorization: Bearer <access token>`
/// header.
///
/// Refresh tokens are refused here. Missing or rejected tokens answer 401;
/// key problems stay 500.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub payload: TokenPayload,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).map_err(unauthorized)?.to_string();

        let validator = state.validator.clone();
        let payload = tokio::task::spawn_blocking(move || {
            validator.verify_kind(&token, TokenKind::Access)
        })
        .await
        .map_err(AuthError::unexpected)?;

        let payload = match payload {
            Ok(payload) => {
                track_token_validation(None);
                payload
            }
            Err(e) => {
                track_token_validation(Some(e.reason().map_or(e.kind(), |r| r.as_str())));
                return Err(unauthorized(e));
            }
        };

        let user_id = payload
            .claim
            .id()
            .parse()
            .map_err(|_| unauthorized(AuthError::token_invalid(InvalidReason::Malformed)))?;

        Ok(AuthUser { user_id, payload })
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AuthError::MissingCredential("Authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::MissingCredential("bearer token".to_string()))
}

fn unauthorized(err: AuthError) -> AppError {
    if err.status_code() == StatusCode::BAD_REQUEST {
        AppError::unauthorized(err)
    } else {
        AppError::classify(err)
    }
}
