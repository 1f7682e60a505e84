use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::progress::{
    CreatePersonalRecordRequest, CreateProgressPhotoRequest, RecordsQuery,
};
use storage::models::{PersonalRecord, ProgressPhoto};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/progress/photos",
    responses(
        (status = 200, description = "Most recent progress photos", body = Vec<ProgressPhoto>)
    ),
    tag = "progress"
)]
pub async fn list_photos(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let photos = services::list_photos(state.db.pool(), &user.user_id).await?;

    Ok(Json(photos).into_response())
}

#[utoipa::path(
    post,
    path = "/api/progress/photos",
    request_body = CreateProgressPhotoRequest,
    responses(
        (status = 201, description = "Photo recorded", body = ProgressPhoto),
        (status = 400, description = "Validation error")
    ),
    tag = "progress"
)]
pub async fn create_photo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateProgressPhotoRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let photo = services::create_photo(state.db.pool(), &user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(photo)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/progress/records",
    params(RecordsQuery),
    responses(
        (status = 200, description = "Personal records, newest first", body = Vec<PersonalRecord>)
    ),
    tag = "progress"
)]
pub async fn list_records(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<RecordsQuery>,
) -> Result<Response, WebError> {
    let records =
        services::list_records(state.db.pool(), &user.user_id, query.exercise_id).await?;

    Ok(Json(records).into_response())
}

#[utoipa::path(
    post,
    path = "/api/progress/records",
    request_body = CreatePersonalRecordRequest,
    responses(
        (status = 201, description = "Record appended", body = PersonalRecord),
        (status = 400, description = "Validation error")
    ),
    tag = "progress"
)]
pub async fn create_record(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreatePersonalRecordRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let record = services::create_record(state.db.pool(), &user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(record)).into_response())
}
