//! # Tollgate Config
//!
//! Configuration types for Tollgate, loaded from environment variables:
//!
//! - [`jwt`]: signing keys, algorithm and token lifetimes
//! - [`cookie`]: refresh cookie attributes
//! - [`server`]: bind address and debug mode
//! - [`password`]: bcrypt work factor
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```ignore
//! use tollgate_config::{CookieConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let cookie_config = CookieConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cookie;
pub mod cors;
pub mod jwt;
pub mod password;
pub mod server;

// Re-export commonly used types at crate root
pub use cookie::{CookieConfig, LOGOUT_SENTINEL};
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },

    #[error("unsupported configuration: {0}")]
    Unsupported(String),
}

/// Truthy values: `1`, `true`, `yes`, `on` (case-insensitive).
pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
