use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqlitePool;
use tollgate_core::{AppError, hash_password_with_cost};
use tollgate_observability::track_user_created;
use tracing::instrument;

use super::model::{User, UserCreate, UserId};

const USER_COLUMNS: &str = "id, username, hashed_password, created_at, updated_at";

pub struct UserService;

impl UserService {
    /// Stores a new user with a bcrypt hash of the password.
    ///
    /// A taken username is a 400.
    #[instrument(skip(db, credentials), fields(username = %credentials.username))]
    pub async fn create_user(
        db: &SqlitePool,
        credentials: UserCreate,
        bcrypt_cost: u32,
    ) -> Result<User, AppError> {
        if Self::find_by_username(db, &credentials.username)
            .await?
            .is_some()
        {
            return Err(duplicate_username(&credentials.username));
        }

        let UserCreate { username, password } = credentials;
        let hashed_password =
            tokio::task::spawn_blocking(move || hash_password_with_cost(&password, bcrypt_cost))
                .await
                .map_err(AppError::internal)??;

        let now = Utc::now();
        let result = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(UserId::new())
        .bind(&username)
        .bind(&hashed_password)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await;

        let user = match result {
            Ok(user) => user,
            // Lost a race against a concurrent registration
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(duplicate_username(&username));
            }
            Err(e) => return Err(e.into()),
        };

        track_user_created();
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn find_by_username(
        db: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &SqlitePool, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}

fn duplicate_username(username: &str) -> AppError {
    AppError::bad_request(anyhow!(
        "There's already a user with username {}",
        username
    ))
}
