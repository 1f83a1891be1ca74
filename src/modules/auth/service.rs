use anyhow::anyhow;
use axum_extra::extract::CookieJar;
use tollgate_auth::{IdentityClaim, TokenKind, TokenPair, TokenPayload};
use tollgate_core::{AppError, AuthError, verify_password};
use tollgate_observability::{
    track_login_failure, track_login_success, track_token_validation, track_tokens_issued,
};
use tracing::instrument;

use crate::modules::users::model::{User, UserCreate, UserId};
use crate::modules::users::service::UserService;
use crate::state::AppState;

pub struct AuthService;

impl AuthService {
    /// Checks the password and mints a fresh token pair for the user.
    ///
    /// Unknown username is a 404, wrong password a 400.
    #[instrument(skip(state, credentials), fields(username = %credentials.username))]
    pub async fn login(state: &AppState, credentials: UserCreate) -> Result<TokenPair, AppError> {
        let UserCreate { username, password } = credentials;

        let Some(user) = UserService::find_by_username(&state.db, &username).await? else {
            track_login_failure("unknown_user");
            return Err(AuthError::NotFound(format!(
                "Couldn't find user with username {}",
                username
            ))
            .into());
        };

        let hashed_password = user.hashed_password.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &hashed_password))
                .await
                .map_err(AuthError::unexpected)??;

        if !matches {
            track_login_failure("wrong_password");
            return Err(AuthError::CredentialMismatch(username).into());
        }

        let pair = Self::issue_pair(state, &user).await?;
        track_login_success();
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Verifies the refresh token from the cookie and mints a new pair for
    /// the user it names.
    ///
    /// The presented refresh token stays valid until its own expiry.
    #[instrument(skip_all)]
    pub async fn refresh(state: &AppState, jar: &CookieJar) -> Result<TokenPair, AppError> {
        let payload = Self::verify_refresh_cookie(state, jar).await?;

        let user_id: UserId = payload
            .claim
            .id()
            .parse()
            .map_err(|_| unknown_token_user())?;
        let user = UserService::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(unknown_token_user)?;

        let pair = Self::issue_pair(state, &user).await?;
        tracing::info!(user_id = %user.id, "Token pair refreshed");
        Ok(pair)
    }

    async fn verify_refresh_cookie(
        state: &AppState,
        jar: &CookieJar,
    ) -> Result<TokenPayload, AppError> {
        let validator = state.validator.clone();
        let cookie_name = state.cookie_config.name.clone();
        let jar = jar.clone();

        let result = tokio::task::spawn_blocking(move || {
            validator
                .extract_from_cookie_and_verify(&jar, &cookie_name)?
                .expect_kind(TokenKind::Refresh)
        })
        .await
        .map_err(AuthError::unexpected)?;

        match result {
            Ok(payload) => {
                track_token_validation(None);
                Ok(payload)
            }
            Err(e) => {
                track_token_validation(Some(e.reason().map_or(e.kind(), |r| r.as_str())));
                Err(e.into())
            }
        }
    }

    async fn issue_pair(state: &AppState, user: &User) -> Result<TokenPair, AppError> {
        let claim = IdentityClaim::new(user.id.to_string());
        let issuer = state.issuer.clone();

        let pair = tokio::task::spawn_blocking(move || issuer.mint_pair(&claim))
            .await
            .map_err(AuthError::unexpected)??;

        track_tokens_issued(TokenKind::Access.as_str());
        track_tokens_issued(TokenKind::Refresh.as_str());
        Ok(pair)
    }
}

fn unknown_token_user() -> AppError {
    AppError::bad_request(anyhow!("Couldn't find the user this token was issued to"))
}
