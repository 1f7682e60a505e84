use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::workout::{
    CreateWorkoutSessionRequest, CreateWorkoutSetRequest, SessionListQuery,
    UpdateWorkoutSessionRequest, UpdateWorkoutSetRequest,
};
use storage::models::{Exercise, WorkoutProgram, WorkoutSession, WorkoutSet};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/workouts/programs",
    responses(
        (status = 200, description = "Active workout programs", body = Vec<WorkoutProgram>)
    ),
    tag = "workouts"
)]
pub async fn list_programs(State(state): State<AppState>) -> Result<Response, WebError> {
    let programs = services::list_programs(state.db.pool()).await?;

    Ok(Json(programs).into_response())
}

#[utoipa::path(
    get,
    path = "/api/exercises",
    responses(
        (status = 200, description = "Exercise catalog", body = Vec<Exercise>)
    ),
    tag = "workouts"
)]
pub async fn list_exercises(State(state): State<AppState>) -> Result<Response, WebError> {
    let exercises = services::list_exercises(state.db.pool()).await?;

    Ok(Json(exercises).into_response())
}

#[utoipa::path(
    get,
    path = "/api/workouts/sessions",
    params(SessionListQuery),
    responses(
        (status = 200, description = "The caller's sessions, newest first", body = Vec<WorkoutSession>)
    ),
    tag = "workouts"
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SessionListQuery>,
) -> Result<Response, WebError> {
    let sessions = services::list_sessions(state.db.pool(), &user.user_id, query.limit).await?;

    Ok(Json(sessions).into_response())
}

#[utoipa::path(
    post,
    path = "/api/workouts/sessions",
    request_body = CreateWorkoutSessionRequest,
    responses(
        (status = 201, description = "Session created", body = WorkoutSession),
        (status = 400, description = "Validation error")
    ),
    tag = "workouts"
)]
pub async fn create_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateWorkoutSessionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let session = services::create_session(state.db.pool(), &user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(session)).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/workouts/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    request_body = UpdateWorkoutSessionRequest,
    responses(
        (status = 200, description = "Session updated", body = WorkoutSession),
        (status = 404, description = "Session not found")
    ),
    tag = "workouts"
)]
pub async fn update_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWorkoutSessionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let session = services::update_session(state.db.pool(), &user.user_id, id, &req).await?;

    Ok(Json(session).into_response())
}

#[utoipa::path(
    get,
    path = "/api/workouts/sessions/{id}/sets",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "Sets of the session in set-number order", body = Vec<WorkoutSet>),
        (status = 404, description = "Session not found")
    ),
    tag = "workouts"
)]
pub async fn list_session_sets(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let sets = services::session_sets(state.db.pool(), &user.user_id, id).await?;

    Ok(Json(sets).into_response())
}

#[utoipa::path(
    post,
    path = "/api/workouts/sets",
    request_body = CreateWorkoutSetRequest,
    responses(
        (status = 201, description = "Set logged", body = WorkoutSet),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Session not found")
    ),
    tag = "workouts"
)]
pub async fn create_set(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateWorkoutSetRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let set = services::log_set(state.db.pool(), &user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(set)).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/workouts/sets/{id}",
    params(
        ("id" = Uuid, Path, description = "Set id")
    ),
    request_body = UpdateWorkoutSetRequest,
    responses(
        (status = 200, description = "Set updated", body = WorkoutSet),
        (status = 404, description = "Set not found")
    ),
    tag = "workouts"
)]
pub async fn update_set(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWorkoutSetRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let set = services::update_set(state.db.pool(), &user.user_id, id, &req).await?;

    Ok(Json(set).into_response())
}
