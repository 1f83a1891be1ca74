use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{join, login, logout, refresh};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/join", post(join))
        .route("/login", post(login))
        .route("/refresh", get(refresh))
        .route("/logout", get(logout))
}
