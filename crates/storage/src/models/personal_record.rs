use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_id: Uuid,
    pub weight: Decimal,
    pub reps: i32,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
