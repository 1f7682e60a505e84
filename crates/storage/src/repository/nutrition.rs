use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::PgPool;

use crate::dto::nutrition::CreateMealEntryRequest;
use crate::error::Result;
use crate::models::MealEntry;

const MEAL_COLUMNS: &str = "id, user_id, recipe_id, date, meal_type, servings, \
     calories, protein, carbs, fat, created_at";

pub struct NutritionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NutritionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_meal_entry(
        &self,
        user_id: &str,
        req: &CreateMealEntryRequest,
    ) -> Result<MealEntry> {
        let entry = sqlx::query_as::<_, MealEntry>(&format!(
            r#"
            INSERT INTO meal_entries
                (user_id, recipe_id, date, meal_type, servings, calories, protein, carbs, fat)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {MEAL_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(req.recipe_id)
        .bind(req.date)
        .bind(&req.meal_type)
        .bind(req.servings)
        .bind(req.calories)
        .bind(req.protein)
        .bind(req.carbs)
        .bind(req.fat)
        .fetch_one(self.pool)
        .await?;

        Ok(entry)
    }

    /// Entries logged on one calendar day (UTC), oldest first.
    pub async fn meal_entries_on(&self, user_id: &str, day: NaiveDate) -> Result<Vec<MealEntry>> {
        let start: DateTime<Utc> = day
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();
        let end = start + Duration::days(1);

        let entries = sqlx::query_as::<_, MealEntry>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
            FROM meal_entries
            WHERE user_id = $1 AND date >= $2 AND date < $3
            ORDER BY date
            "#
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}
