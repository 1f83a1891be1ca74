//! # Tollgate Models
//!
//! Domain models and DTOs.
//!
//! - [`ids`]: [`UserId`]
//! - [`users`]: the [`User`] entity, the [`UserCreate`] credentials body and [`UserProfile`]
//! - [`auth`]: response bodies of the auth endpoints

pub mod auth;
pub mod ids;
pub mod users;

pub use auth::{AccessTokenResponse, ErrorResponse, MessageResponse};
pub use ids::UserId;
pub use users::{User, UserCreate, UserProfile};
