use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::dto::user::UserResponse;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/auth/user",
    responses(
        (status = 200, description = "Current user with effective subscription state", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let user = services::current_user(state.db.pool(), &user.user_id).await?;

    Ok(Json(UserResponse::from_user_at(user, Utc::now())).into_response())
}
