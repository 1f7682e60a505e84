use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Request payload for starting a workout session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutSessionRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    pub date: DateTime<Utc>,

    pub program_id: Option<Uuid>,

    #[validate(range(min = 0, max = 1440))]
    pub duration: Option<i32>,

    #[validate(length(max = 10_000))]
    pub notes: Option<String>,

    #[serde(default)]
    pub completed: bool,
}

/// Completion/duration update for an existing session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutSessionRequest {
    pub completed: Option<bool>,

    #[validate(range(min = 0, max = 1440))]
    pub duration: Option<i32>,

    #[validate(length(max = 10_000))]
    pub notes: Option<String>,
}

/// Request payload for logging a set.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutSetRequest {
    pub session_id: Uuid,

    pub exercise_id: Uuid,

    #[validate(range(min = 1, message = "Set number starts at 1"))]
    pub set_number: i32,

    #[validate(range(min = 0))]
    pub reps: Option<i32>,

    #[validate(custom(function = "validate_weight"))]
    pub weight: Option<Decimal>,

    pub rpe: Option<Decimal>,

    #[validate(range(min = 0))]
    pub rest_time: Option<i32>,

    #[validate(length(max = 20))]
    pub tempo: Option<String>,

    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutSetRequest {
    #[validate(range(min = 0))]
    pub reps: Option<i32>,

    #[validate(custom(function = "validate_weight"))]
    pub weight: Option<Decimal>,

    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SessionListQuery {
    /// Maximum number of sessions to return, newest first.
    pub limit: Option<i64>,
}

fn validate_weight(weight: &Decimal) -> Result<(), validator::ValidationError> {
    if weight.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_weight"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_weight_is_rejected() {
        let req = CreateWorkoutSetRequest {
            session_id: Uuid::nil(),
            exercise_id: Uuid::nil(),
            set_number: 1,
            reps: Some(5),
            weight: Some(Decimal::new(-100, 1)),
            rpe: None,
            rest_time: None,
            tempo: None,
            completed: true,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn set_number_zero_is_rejected() {
        let req = CreateWorkoutSetRequest {
            session_id: Uuid::nil(),
            exercise_id: Uuid::nil(),
            set_number: 0,
            reps: None,
            weight: None,
            rpe: None,
            rest_time: None,
            tempo: None,
            completed: false,
        };

        assert!(req.validate().is_err());
    }
}
