use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::workout::{
    CreateWorkoutSessionRequest, CreateWorkoutSetRequest, UpdateWorkoutSessionRequest,
    UpdateWorkoutSetRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{WorkoutSession, WorkoutSet};

const SESSION_COLUMNS: &str =
    "id, user_id, program_id, name, date, duration, notes, completed, created_at";

const SET_COLUMNS: &str = "id, session_id, exercise_id, set_number, reps, weight, rpe, \
     rest_time, tempo, completed, created_at";

pub struct WorkoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WorkoutRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_session(
        &self,
        user_id: &str,
        req: &CreateWorkoutSessionRequest,
    ) -> Result<WorkoutSession> {
        let session = sqlx::query_as::<_, WorkoutSession>(&format!(
            r#"
            INSERT INTO workout_sessions (user_id, program_id, name, date, duration, notes, completed)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(req.program_id)
        .bind(&req.name)
        .bind(req.date)
        .bind(req.duration)
        .bind(&req.notes)
        .bind(req.completed)
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }

    /// List the user's sessions, newest first.
    pub async fn list_sessions(&self, user_id: &str, limit: i64) -> Result<Vec<WorkoutSession>> {
        let sessions = sqlx::query_as::<_, WorkoutSession>(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM workout_sessions
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(sessions)
    }

    pub async fn find_session(&self, id: Uuid, user_id: &str) -> Result<WorkoutSession> {
        let session = sqlx::query_as::<_, WorkoutSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM workout_sessions WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(session)
    }

    /// Completion/duration update; other fields are immutable after creation.
    pub async fn update_session(
        &self,
        id: Uuid,
        user_id: &str,
        req: &UpdateWorkoutSessionRequest,
    ) -> Result<WorkoutSession> {
        let session = sqlx::query_as::<_, WorkoutSession>(&format!(
            r#"
            UPDATE workout_sessions
            SET completed = COALESCE($3, completed),
                duration = COALESCE($4, duration),
                notes = COALESCE($5, notes)
            WHERE id = $1 AND user_id = $2
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(req.completed)
        .bind(req.duration)
        .bind(&req.notes)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(session)
    }

    pub async fn create_set(&self, req: &CreateWorkoutSetRequest) -> Result<WorkoutSet> {
        let set = sqlx::query_as::<_, WorkoutSet>(&format!(
            r#"
            INSERT INTO workout_sets
                (session_id, exercise_id, set_number, reps, weight, rpe, rest_time, tempo, completed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {SET_COLUMNS}
            "#
        ))
        .bind(req.session_id)
        .bind(req.exercise_id)
        .bind(req.set_number)
        .bind(req.reps)
        .bind(req.weight)
        .bind(req.rpe)
        .bind(req.rest_time)
        .bind(&req.tempo)
        .bind(req.completed)
        .fetch_one(self.pool)
        .await?;

        Ok(set)
    }

    pub async fn list_sets(&self, session_id: Uuid) -> Result<Vec<WorkoutSet>> {
        let sets = sqlx::query_as::<_, WorkoutSet>(&format!(
            r#"
            SELECT {SET_COLUMNS}
            FROM workout_sets
            WHERE session_id = $1
            ORDER BY set_number
            "#
        ))
        .bind(session_id)
        .fetch_all(self.pool)
        .await?;

        Ok(sets)
    }

    /// Update a set, scoped to sets whose session belongs to the user.
    pub async fn update_set(
        &self,
        id: Uuid,
        user_id: &str,
        req: &UpdateWorkoutSetRequest,
    ) -> Result<WorkoutSet> {
        let set = sqlx::query_as::<_, WorkoutSet>(&format!(
            r#"
            UPDATE workout_sets
            SET reps = COALESCE($3, reps),
                weight = COALESCE($4, weight),
                completed = COALESCE($5, completed)
            WHERE id = $1
              AND session_id IN (SELECT id FROM workout_sessions WHERE user_id = $2)
            RETURNING {SET_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(req.reps)
        .bind(req.weight)
        .bind(req.completed)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(set)
    }
}
