use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use crate::services::analytics::{AnalyticsStore, CompletedSet};

#[derive(FromRow)]
struct SetVolumeRow {
    weight: Option<rust_decimal::Decimal>,
    reps: Option<i32>,
}

/// Postgres-backed read side of the analytics engine.
///
/// Owns a pool clone so it can live behind `Arc<dyn AnalyticsStore>` in the
/// application state.
#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsStore for AnalyticsRepository {
    async fn completed_sets_between(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CompletedSet>> {
        let rows = sqlx::query_as::<_, SetVolumeRow>(
            r#"
            SELECT ws.weight, ws.reps
            FROM workout_sets ws
            INNER JOIN workout_sessions s ON s.id = ws.session_id
            WHERE s.user_id = $1
              AND ws.completed = TRUE
              AND s.date >= $2
              AND s.date < $3
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CompletedSet {
                weight: row.weight,
                reps: row.reps,
            })
            .collect())
    }

    async fn completed_session_days(&self, user_id: &str) -> Result<Vec<NaiveDate>> {
        let dates = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT date
            FROM workout_sessions
            WHERE user_id = $1 AND completed = TRUE
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(dates.into_iter().map(|date| date.date_naive()).collect())
    }
}
