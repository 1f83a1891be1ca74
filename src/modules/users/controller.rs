use axum::{Json, extract::State};
use tollgate_core::AppError;
use tollgate_models::ErrorResponse;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::model::UserProfile;
use super::service::UserService;

/// Profile of the user the access token belongs to
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user profile", body = UserProfile),
        (status = 401, description = "Missing, invalid or expired access token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = %auth_user.user_id))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    let user = UserService::find_by_id(&state.db, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;
    Ok(Json(user.into()))
}
