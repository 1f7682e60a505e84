use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub id: Uuid,
    pub session_id: Uuid,
    pub exercise_id: Uuid,
    pub set_number: i32,
    pub reps: Option<i32>,
    pub weight: Option<Decimal>,
    /// Rate of perceived exertion, 1-10.
    pub rpe: Option<Decimal>,
    /// Seconds of rest after the set.
    pub rest_time: Option<i32>,
    pub tempo: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
