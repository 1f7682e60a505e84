use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{create_meal_entry, list_meal_entries, list_recipes};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/nutrition/recipes", get(list_recipes))
        .route("/api/nutrition/meals", get(list_meal_entries))
        .route("/api/nutrition/meals", post(create_meal_entry))
}
