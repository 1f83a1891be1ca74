//! # Tollgate CLI
//!
//! Administrative operations behind the `tollgate-cli` binary.
//!
//! - [`accounts`]: create users directly in the database
//! - [`diagnostics`]: check the configured key pair, inspect tokens
//!
//! ```ignore
//! use tollgate_cli::{accounts, diagnostics};
//!
//! let user = accounts::create_user(&pool, "alice", "secret123", 12).await?;
//! let report = diagnostics::check_keys(&JwtConfig::from_env()?)?;
//! ```

pub mod accounts;
pub mod diagnostics;
