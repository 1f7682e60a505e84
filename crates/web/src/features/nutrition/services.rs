use chrono::NaiveDate;
use sqlx::PgPool;
use storage::{
    dto::nutrition::CreateMealEntryRequest,
    error::Result,
    models::{MealEntry, Recipe},
    repository::{catalog::CatalogRepository, nutrition::NutritionRepository},
};

const DEFAULT_RECIPE_LIMIT: i64 = 50;

pub async fn list_recipes(pool: &PgPool, limit: Option<i64>) -> Result<Vec<Recipe>> {
    let repo = CatalogRepository::new(pool);
    repo.list_recipes(limit.unwrap_or(DEFAULT_RECIPE_LIMIT)).await
}

pub async fn meal_entries_on(
    pool: &PgPool,
    user_id: &str,
    day: NaiveDate,
) -> Result<Vec<MealEntry>> {
    let repo = NutritionRepository::new(pool);
    repo.meal_entries_on(user_id, day).await
}

pub async fn create_meal_entry(
    pool: &PgPool,
    user_id: &str,
    req: &CreateMealEntryRequest,
) -> Result<MealEntry> {
    let repo = NutritionRepository::new(pool);
    repo.create_meal_entry(user_id, req).await
}
