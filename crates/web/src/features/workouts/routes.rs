use axum::{
    Router,
    routing::{get, patch, post},
};

use super::handlers::{
    create_session, create_set, list_exercises, list_programs, list_session_sets, list_sessions,
    update_session, update_set,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/workouts/programs", get(list_programs))
        .route("/api/workouts/sessions", get(list_sessions))
        .route("/api/workouts/sessions", post(create_session))
        .route("/api/workouts/sessions/:id", patch(update_session))
        .route("/api/workouts/sessions/:id/sets", get(list_session_sets))
        .route("/api/workouts/sets", post(create_set))
        .route("/api/workouts/sets/:id", patch(update_set))
        .route("/api/exercises", get(list_exercises))
}
