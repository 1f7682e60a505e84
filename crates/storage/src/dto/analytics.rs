use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct VolumeQuery {
    /// Start of the seven-day window (defaults to today).
    pub week_start: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VolumeResponse {
    pub volume: f64,
}

impl VolumeResponse {
    pub fn new(volume: Decimal) -> Self {
        Self {
            volume: decimal_to_f64(volume),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StreakResponse {
    pub streak: u32,
}

fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_string().parse().unwrap_or(0.0)
}
