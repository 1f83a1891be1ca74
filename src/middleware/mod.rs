//! Request extractors.
//!
//! - [`auth`]: [`auth::AuthUser`], the bearer access token extractor
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn get_profile(auth_user: AuthUser) -> impl IntoResponse {
//!     let user_id = auth_user.user_id;
//!     // ...
//! }
//! ```

pub mod auth;
