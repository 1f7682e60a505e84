use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub muscle_groups: Option<Vec<String>>,
    pub equipment: Option<String>,
    pub instructions: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
