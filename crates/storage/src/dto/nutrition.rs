use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealEntryRequest {
    pub recipe_id: Option<Uuid>,

    pub date: DateTime<Utc>,

    #[validate(length(max = 50))]
    pub meal_type: Option<String>,

    #[serde(default = "default_servings")]
    pub servings: Decimal,

    pub calories: Option<Decimal>,
    pub protein: Option<Decimal>,
    pub carbs: Option<Decimal>,
    pub fat: Option<Decimal>,
}

fn default_servings() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MealEntriesQuery {
    /// Day to fetch entries for (defaults to today).
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecipeListQuery {
    pub limit: Option<i64>,
}
