use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use tollgate_core::AppError;
use tollgate_observability::{track_logout, track_token_refresh};
use tracing::instrument;

use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::cookies::{logout_cookie, refresh_cookie};
use super::model::{
    AccessTokenResponse, ErrorResponse, MessageResponse, UserCreate, access_response,
};
use super::service::AuthService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/auth/join",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Username already taken or malformed body", body = ErrorResponse),
        (status = 422, description = "Username or password length out of bounds", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn join(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<UserCreate>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let user = UserService::create_user(
        &state.db,
        credentials,
        state.password_config.bcrypt_cost,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok(format!(
            "User {} created successfully",
            user.username
        ))),
    ))
}

/// Log in with username and password
///
/// The access token is returned in the body; the refresh token is set as an
/// http-only cookie.
#[utoipa::path(
    post,
    path = "/users/auth/login",
    request_body = UserCreate,
    responses(
        (status = 200, description = "Login successful, refresh cookie set", body = AccessTokenResponse),
        (status = 400, description = "Wrong password", body = ErrorResponse),
        (status = 404, description = "Unknown username", body = ErrorResponse),
        (status = 422, description = "Username or password length out of bounds", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(credentials): ValidatedJson<UserCreate>,
) -> Result<(CookieJar, Json<AccessTokenResponse>), AppError> {
    let pair = AuthService::login(&state, credentials).await?;
    let cookie = refresh_cookie(
        &state.cookie_config,
        pair.refresh_token.clone(),
        pair.refresh_expires_at,
    )?;

    Ok((jar.add(cookie), Json(access_response(&pair))))
}

/// Exchange the refresh cookie for a new access token
///
/// With `JWT_ROTATE_REFRESH_COOKIE=true` the cookie is replaced by the newly
/// minted refresh token; otherwise it is left untouched.
#[utoipa::path(
    get,
    path = "/users/auth/refresh",
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 400, description = "Refresh cookie missing, invalid or expired", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("refresh_cookie" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let pair = AuthService::refresh(&state, &jar).await?;
    let body = Json(access_response(&pair));

    let rotate = state.jwt_config.rotate_refresh_cookie;
    track_token_refresh(rotate);

    if rotate {
        let cookie = refresh_cookie(
            &state.cookie_config,
            pair.refresh_token,
            pair.refresh_expires_at,
        )?;
        return Ok((jar.add(cookie), body).into_response());
    }

    Ok(body.into_response())
}

/// Log out by expiring the refresh cookie
#[utoipa::path(
    get,
    path = "/users/auth/logout",
    responses(
        (status = 200, description = "Refresh cookie overwritten", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    track_logout();
    (
        jar.add(logout_cookie(&state.cookie_config)),
        Json(MessageResponse::ok("Logged out successfully")),
    )
}
