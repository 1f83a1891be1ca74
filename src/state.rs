use sqlx::SqlitePool;
use tollgate_auth::{TokenIssuer, TokenValidator};
use tollgate_config::{CookieConfig, CorsConfig, JwtConfig, PasswordConfig};
use tollgate_core::AuthError;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
    pub issuer: TokenIssuer,
    pub validator: TokenValidator,
}

impl AppState {
    /// Builds the issuer and validator from `jwt_config`. Key files are not
    /// touched here; they are read on every mint and verify.
    pub fn new(
        db: SqlitePool,
        jwt_config: JwtConfig,
        cookie_config: CookieConfig,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            issuer: TokenIssuer::from_config(&jwt_config)?,
            validator: TokenValidator::from_config(&jwt_config)?,
            db,
            jwt_config,
            cookie_config,
            password_config,
            cors_config,
        })
    }
}

/// Reads every config section from the environment, opens the database and
/// applies migrations.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    let db = tollgate_db::connect_and_migrate(&tollgate_db::database_url_from_env()).await?;

    let state = AppState::new(
        db,
        jwt_config,
        CookieConfig::from_env(),
        PasswordConfig::from_env(),
        CorsConfig::from_env(),
    )?;

    tracing::info!(
        algorithm = ?state.jwt_config.algorithm,
        private_key = %state.jwt_config.private_key_path.display(),
        public_key = %state.jwt_config.public_key_path.display(),
        "Application state initialized"
    );
    Ok(state)
}
