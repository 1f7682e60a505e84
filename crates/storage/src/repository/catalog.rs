use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Exercise, Recipe, WorkoutProgram};

/// Read access to the inert reference catalogs: exercises, programs, recipes.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>> {
        let exercises = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, name, description, muscle_groups, equipment, instructions,
                   video_url, created_at
            FROM exercises
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(exercises)
    }

    pub async fn find_exercise(&self, id: Uuid) -> Result<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, name, description, muscle_groups, equipment, instructions,
                   video_url, created_at
            FROM exercises
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(exercise)
    }

    pub async fn list_programs(&self) -> Result<Vec<WorkoutProgram>> {
        let programs = sqlx::query_as::<_, WorkoutProgram>(
            r#"
            SELECT id, name, description, difficulty, program_type, duration_weeks,
                   is_active, created_at
            FROM workout_programs
            WHERE is_active = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(programs)
    }

    pub async fn list_recipes(&self, limit: i64) -> Result<Vec<Recipe>> {
        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, description, instructions, servings, prep_time, cook_time,
                   calories, protein, carbs, fat, fiber, image_url, is_active, created_at
            FROM recipes
            WHERE is_active = TRUE
            ORDER BY name
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(recipes)
    }
}
