use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::progress::{CreatePersonalRecordRequest, CreateProgressPhotoRequest};
use crate::error::Result;
use crate::models::{PersonalRecord, ProgressPhoto};

pub struct ProgressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProgressRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_photo(
        &self,
        user_id: &str,
        req: &CreateProgressPhotoRequest,
    ) -> Result<ProgressPhoto> {
        let photo = sqlx::query_as::<_, ProgressPhoto>(
            r#"
            INSERT INTO progress_photos (user_id, image_url, date, weight, body_fat, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, image_url, date, weight, body_fat, notes, created_at
            "#,
        )
        .bind(user_id)
        .bind(&req.image_url)
        .bind(req.date)
        .bind(req.weight)
        .bind(req.body_fat)
        .bind(&req.notes)
        .fetch_one(self.pool)
        .await?;

        Ok(photo)
    }

    pub async fn list_photos(&self, user_id: &str, limit: i64) -> Result<Vec<ProgressPhoto>> {
        let photos = sqlx::query_as::<_, ProgressPhoto>(
            r#"
            SELECT id, user_id, image_url, date, weight, body_fat, notes, created_at
            FROM progress_photos
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(photos)
    }

    /// Append a record; nothing dedups or supersedes earlier entries.
    pub async fn create_record(
        &self,
        user_id: &str,
        req: &CreatePersonalRecordRequest,
    ) -> Result<PersonalRecord> {
        let record = sqlx::query_as::<_, PersonalRecord>(
            r#"
            INSERT INTO personal_records (user_id, exercise_id, weight, reps, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, exercise_id, weight, reps, date, created_at
            "#,
        )
        .bind(user_id)
        .bind(req.exercise_id)
        .bind(req.weight)
        .bind(req.reps)
        .bind(req.date)
        .fetch_one(self.pool)
        .await?;

        Ok(record)
    }

    pub async fn list_records(
        &self,
        user_id: &str,
        exercise_id: Option<Uuid>,
    ) -> Result<Vec<PersonalRecord>> {
        let records = sqlx::query_as::<_, PersonalRecord>(
            r#"
            SELECT id, user_id, exercise_id, weight, reps, date, created_at
            FROM personal_records
            WHERE user_id = $1 AND ($2::uuid IS NULL OR exercise_id = $2)
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .bind(exercise_id)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }
}
