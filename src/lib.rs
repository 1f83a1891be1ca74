//! # Tollgate
//!
//! Username/password authentication service issuing signed, time-bounded
//! token pairs: a short-lived access token returned in the response body
//! and a long-lived refresh token carried in an http-only cookie.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # AuthUser bearer-token extractor
//! ├── modules/
//! │   ├── auth/        # join, login, refresh, logout
//! │   └── users/       # user store, /users/me
//! ├── docs.rs          # OpenAPI document
//! ├── router.rs        # application router
//! ├── state.rs         # shared application state
//! └── validator.rs     # ValidatedJson extractor
//! ```
//!
//! Token minting and verification live in [`tollgate_auth`]; error kinds and
//! the HTTP error envelope in [`tollgate_core`].
//!
//! ## Token lifecycle
//!
//! ```text
//! Unauthenticated --login--> Authenticated(access, refresh)
//!                  --refresh--> Authenticated(access', refresh')
//!                  --logout--> LoggedOut (cookie overwritten, nothing stored)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! openssl ecparam -name prime256v1 -genkey -noout | openssl pkcs8 -topk8 -nocrypt -out JWT_EC_PRIVKEY.pem
//! openssl ec -in JWT_EC_PRIVKEY.pem -pubout -out JWT_EC_PUBKEY.pem
//! cargo run
//! ```
//!
//! Swagger UI is served at `/swagger-ui`, Scalar at `/scalar`.

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use tollgate_auth;
pub use tollgate_config;
pub use tollgate_core;
pub use tollgate_db;
pub use tollgate_models;
