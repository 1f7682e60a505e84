use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::dto::nutrition::{CreateMealEntryRequest, MealEntriesQuery, RecipeListQuery};
use storage::models::{MealEntry, Recipe};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/nutrition/recipes",
    params(RecipeListQuery),
    responses(
        (status = 200, description = "Active recipes", body = Vec<Recipe>)
    ),
    tag = "nutrition"
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<RecipeListQuery>,
) -> Result<Response, WebError> {
    let recipes = services::list_recipes(state.db.pool(), query.limit).await?;

    Ok(Json(recipes).into_response())
}

#[utoipa::path(
    get,
    path = "/api/nutrition/meals",
    params(MealEntriesQuery),
    responses(
        (status = 200, description = "Meal entries for the day", body = Vec<MealEntry>)
    ),
    tag = "nutrition"
)]
pub async fn list_meal_entries(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<MealEntriesQuery>,
) -> Result<Response, WebError> {
    let day = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let entries = services::meal_entries_on(state.db.pool(), &user.user_id, day).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    post,
    path = "/api/nutrition/meals",
    request_body = CreateMealEntryRequest,
    responses(
        (status = 201, description = "Meal entry created", body = MealEntry),
        (status = 400, description = "Validation error")
    ),
    tag = "nutrition"
)]
pub async fn create_meal_entry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateMealEntryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let entry = services::create_meal_entry(state.db.pool(), &user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}
