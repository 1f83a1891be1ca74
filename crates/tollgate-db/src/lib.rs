//! # Tollgate DB
//!
//! SQLite connection pool and embedded migrations.
//!
//! # Example
//!
//! ```ignore
//! use tollgate_db::{database_url_from_env, init_db_pool, MIGRATOR};
//!
//! let pool = init_db_pool(&database_url_from_env()).await?;
//! MIGRATOR.run(&pool).await?;
//! ```

use std::env;
use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use sqlx::SqlitePool;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://tollgate.db";

/// Migrations under `migrations/`, compiled into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// `DATABASE_URL`, or [`DEFAULT_DATABASE_URL`] when unset.
pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Opens a pool on `database_url`, creating the database file if needed.
///
/// The pool is cheaply cloneable and is meant to be created once at startup
/// and stored in the application state.
pub async fn init_db_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!(database_url = %database_url, "Database pool initialized");
    Ok(pool)
}

/// Opens a pool and applies every pending migration.
pub async fn connect_and_migrate(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = init_db_pool(database_url).await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

/// Single-connection in-memory database with migrations applied.
///
/// The connection is never recycled, so the database lives as long as the
/// pool does.
pub async fn init_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_pool_has_users_table() {
        let pool = init_memory_pool().await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let pool = init_memory_pool().await.unwrap();
        let insert = "INSERT INTO users (id, username, hashed_password, created_at, updated_at) \
                      VALUES (?, ?, 'x', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')";

        sqlx::query(insert).bind("a").bind("alice").execute(&pool).await.unwrap();
        let err = sqlx::query(insert)
            .bind("b")
            .bind("alice")
            .execute(&pool)
            .await
            .unwrap_err();

        let db_err = err.as_database_error().unwrap();
        assert!(db_err.is_unique_violation());
    }
}
