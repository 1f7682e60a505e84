use axum::{Json, Router, middleware, routing::get};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::features::{analytics, billing, nutrition, progress, users, workouts};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .merge(billing::routes::public_routes());

    let protected_routes = Router::new()
        .merge(users::routes::routes())
        .merge(workouts::routes::routes())
        .merge(nutrition::routes::routes())
        .merge(progress::routes::routes())
        .merge(analytics::routes::routes())
        .merge(billing::routes::protected_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
