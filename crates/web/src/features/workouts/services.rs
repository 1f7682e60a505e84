use sqlx::PgPool;
use storage::{
    dto::workout::{
        CreateWorkoutSessionRequest, CreateWorkoutSetRequest, UpdateWorkoutSessionRequest,
        UpdateWorkoutSetRequest,
    },
    error::Result,
    models::{Exercise, WorkoutProgram, WorkoutSession, WorkoutSet},
    repository::{catalog::CatalogRepository, workout::WorkoutRepository},
};
use uuid::Uuid;

const DEFAULT_SESSION_LIMIT: i64 = 20;

pub async fn list_programs(pool: &PgPool) -> Result<Vec<WorkoutProgram>> {
    let repo = CatalogRepository::new(pool);
    repo.list_programs().await
}

pub async fn list_exercises(pool: &PgPool) -> Result<Vec<Exercise>> {
    let repo = CatalogRepository::new(pool);
    repo.list_exercises().await
}

pub async fn list_sessions(
    pool: &PgPool,
    user_id: &str,
    limit: Option<i64>,
) -> Result<Vec<WorkoutSession>> {
    let repo = WorkoutRepository::new(pool);
    repo.list_sessions(user_id, limit.unwrap_or(DEFAULT_SESSION_LIMIT))
        .await
}

pub async fn create_session(
    pool: &PgPool,
    user_id: &str,
    req: &CreateWorkoutSessionRequest,
) -> Result<WorkoutSession> {
    let repo = WorkoutRepository::new(pool);
    repo.create_session(user_id, req).await
}

pub async fn update_session(
    pool: &PgPool,
    user_id: &str,
    id: Uuid,
    req: &UpdateWorkoutSessionRequest,
) -> Result<WorkoutSession> {
    let repo = WorkoutRepository::new(pool);
    repo.update_session(id, user_id, req).await
}

/// List a session's sets after verifying the session belongs to the caller.
pub async fn session_sets(
    pool: &PgPool,
    user_id: &str,
    session_id: Uuid,
) -> Result<Vec<WorkoutSet>> {
    let repo = WorkoutRepository::new(pool);
    repo.find_session(session_id, user_id).await?;
    repo.list_sets(session_id).await
}

/// Log a set, rejecting sessions owned by someone else.
pub async fn log_set(
    pool: &PgPool,
    user_id: &str,
    req: &CreateWorkoutSetRequest,
) -> Result<WorkoutSet> {
    let repo = WorkoutRepository::new(pool);
    repo.find_session(req.session_id, user_id).await?;
    repo.create_set(req).await
}

pub async fn update_set(
    pool: &PgPool,
    user_id: &str,
    id: Uuid,
    req: &UpdateWorkoutSetRequest,
) -> Result<WorkoutSet> {
    let repo = WorkoutRepository::new(pool);
    repo.update_set(id, user_id, req).await
}
