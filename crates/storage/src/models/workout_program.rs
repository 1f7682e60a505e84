use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutProgram {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    pub duration_weeks: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
