use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::dto::analytics::{StreakResponse, VolumeQuery, VolumeResponse};

use crate::error::WebError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/analytics/volume",
    params(VolumeQuery),
    responses(
        (status = 200, description = "Training volume for the week", body = VolumeResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "analytics"
)]
pub async fn weekly_volume(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<VolumeQuery>,
) -> Result<Response, WebError> {
    let week_start = match query.week_start {
        Some(day) => day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
        None => Utc::now(),
    };

    let volume = state.analytics.weekly_volume(&user.user_id, week_start).await?;

    Ok(Json(VolumeResponse::new(volume)).into_response())
}

#[utoipa::path(
    get,
    path = "/analytics/streak",
    responses(
        (status = 200, description = "Consecutive-day workout streak", body = StreakResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "analytics"
)]
pub async fn workout_streak(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let streak = state.analytics.workout_streak(&user.user_id).await?;

    Ok(Json(StreakResponse { streak }).into_response())
}
