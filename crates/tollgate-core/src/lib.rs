//! # Tollgate Core
//!
//! Core types shared across the Tollgate workspace.
//!
//! - [`errors`]: the [`AuthError`] failure kinds and the [`AppError`] HTTP envelope
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use tollgate_core::{AppError, AuthError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! if !verify_password("secure_password", &hash)? {
//!     return Err(AuthError::CredentialMismatch("alice".into()).into());
//! }
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, AuthError, InvalidReason};
pub use password::{hash_password, hash_password_with_cost, verify_password};
