//! Credential check, token issuance and the refresh cookie.
//!
//! | route | effect |
//! |---|---|
//! | `POST /users/auth/join` | create a user |
//! | `POST /users/auth/login` | access token in the body, refresh token in the cookie |
//! | `GET /users/auth/refresh` | new access token from the refresh cookie |
//! | `GET /users/auth/logout` | overwrite the refresh cookie with an expired sentinel |

pub mod controller;
pub mod cookies;
pub mod model;
pub mod router;
pub mod service;
