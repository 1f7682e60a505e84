use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{create_photo, create_record, list_photos, list_records};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/progress/photos", get(list_photos))
        .route("/api/progress/photos", post(create_photo))
        .route("/api/progress/records", get(list_records))
        .route("/api/progress/records", post(create_record))
}
