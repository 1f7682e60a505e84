use axum::{Router, routing::get};

use super::handlers::{weekly_volume, workout_streak};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/volume", get(weekly_volume))
        .route("/analytics/streak", get(workout_streak))
}
