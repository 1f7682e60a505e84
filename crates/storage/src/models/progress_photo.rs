use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPhoto {
    pub id: Uuid,
    pub user_id: String,
    pub image_url: String,
    pub date: DateTime<Utc>,
    pub weight: Option<Decimal>,
    pub body_fat: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
