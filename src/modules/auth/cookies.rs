use axum_extra::extract::cookie::Cookie;
use chrono::{DateTime, Utc};
use time::{Duration, OffsetDateTime};
use tollgate_config::{CookieConfig, LOGOUT_SENTINEL};
use tollgate_core::AppError;

/// Http-only refresh cookie expiring together with the token it carries.
pub fn refresh_cookie(
    config: &CookieConfig,
    token: String,
    expires_at: DateTime<Utc>,
) -> Result<Cookie<'static>, AppError> {
    let expires = OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
        .map_err(AppError::internal)?;
    Ok(build(config, token, expires))
}

/// Overwrites the refresh cookie with the logout sentinel, already expired.
pub fn logout_cookie(config: &CookieConfig) -> Cookie<'static> {
    build(
        config,
        LOGOUT_SENTINEL.to_string(),
        OffsetDateTime::now_utc() - Duration::hours(1),
    )
}

fn build(config: &CookieConfig, value: String, expires: OffsetDateTime) -> Cookie<'static> {
    Cookie::build((config.name.clone(), value))
        .http_only(true)
        .secure(config.secure)
        .path(config.path.clone())
        .expires(expires)
        .build()
}
