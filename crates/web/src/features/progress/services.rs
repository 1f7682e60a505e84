use sqlx::PgPool;
use storage::{
    dto::progress::{CreatePersonalRecordRequest, CreateProgressPhotoRequest},
    error::Result,
    models::{PersonalRecord, ProgressPhoto},
    repository::progress::ProgressRepository,
};
use uuid::Uuid;

const DEFAULT_PHOTO_LIMIT: i64 = 20;

pub async fn list_photos(pool: &PgPool, user_id: &str) -> Result<Vec<ProgressPhoto>> {
    let repo = ProgressRepository::new(pool);
    repo.list_photos(user_id, DEFAULT_PHOTO_LIMIT).await
}

pub async fn create_photo(
    pool: &PgPool,
    user_id: &str,
    req: &CreateProgressPhotoRequest,
) -> Result<ProgressPhoto> {
    let repo = ProgressRepository::new(pool);
    repo.create_photo(user_id, req).await
}

pub async fn list_records(
    pool: &PgPool,
    user_id: &str,
    exercise_id: Option<Uuid>,
) -> Result<Vec<PersonalRecord>> {
    let repo = ProgressRepository::new(pool);
    repo.list_records(user_id, exercise_id).await
}

pub async fn create_record(
    pool: &PgPool,
    user_id: &str,
    req: &CreatePersonalRecordRequest,
) -> Result<PersonalRecord> {
    let repo = ProgressRepository::new(pool);
    repo.create_record(user_id, req).await
}
