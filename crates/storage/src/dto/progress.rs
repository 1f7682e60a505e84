use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgressPhotoRequest {
    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: String,

    pub date: DateTime<Utc>,

    pub weight: Option<Decimal>,
    pub body_fat: Option<Decimal>,

    #[validate(length(max = 10_000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonalRecordRequest {
    pub exercise_id: Uuid,

    #[validate(custom(function = "validate_weight"))]
    pub weight: Decimal,

    #[validate(range(min = 1))]
    pub reps: i32,

    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RecordsQuery {
    /// Restrict to records for one exercise.
    pub exercise_id: Option<Uuid>,
}

fn validate_weight(weight: &Decimal) -> Result<(), validator::ValidationError> {
    if weight.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_weight"));
    }
    Ok(())
}
