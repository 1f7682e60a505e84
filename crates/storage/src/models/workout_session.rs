use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: Uuid,
    pub user_id: String,
    pub program_id: Option<Uuid>,
    pub name: String,
    pub date: DateTime<Utc>,
    /// Minutes, set when the session is finished.
    pub duration: Option<i32>,
    pub notes: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
