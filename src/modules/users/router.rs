use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_profile;

pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/me", get(get_profile))
}
