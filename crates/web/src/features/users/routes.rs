use axum::{Router, routing::get};

use super::handlers::get_current_user;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/auth/user", get(get_current_user))
}
