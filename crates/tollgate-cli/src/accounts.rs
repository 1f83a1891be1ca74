use anyhow::{Context, bail};
use chrono::Utc;
use sqlx::SqlitePool;
use tollgate_core::hash_password_with_cost;
use tollgate_models::{User, UserCreate, UserId};
use validator::Validate;

/// Creates a user with a bcrypt hash of `password`.
///
/// Applies the same length rules as the `/users/auth/join` endpoint.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    bcrypt_cost: u32,
) -> anyhow::Result<User> {
    let credentials = UserCreate {
        username: username.to_string(),
        password: password.to_string(),
    };
    credentials
        .validate()
        .context("Invalid username or password")?;

    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        bail!("User {} already exists", username);
    }

    let password = credentials.password;
    let hashed_password =
        tokio::task::spawn_blocking(move || hash_password_with_cost(&password, bcrypt_cost))
            .await
            .context("Password hashing task failed")?
            .map_err(|e| e.error)?;

    let now = Utc::now();
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, username, hashed_password, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) \
         RETURNING id, username, hashed_password, created_at, updated_at",
    )
    .bind(UserId::new())
    .bind(username)
    .bind(&hashed_password)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .context("Failed to insert user")?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created from CLI");
    Ok(user)
}
