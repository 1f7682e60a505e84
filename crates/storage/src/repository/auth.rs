use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::Result;

/// Row of the externally provisioned session-token table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRecord {
    pub sid: String,
    pub user_id: String,
    pub expire: DateTime<Utc>,
}

pub struct SessionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a session token, ignoring expired rows.
    pub async fn find_valid(&self, sid: &str, now: DateTime<Utc>) -> Result<Option<SessionRecord>> {
        let session = sqlx::query_as::<_, SessionRecord>(
            "SELECT sid, user_id, expire FROM sessions WHERE sid = $1 AND expire > $2",
        )
        .bind(sid)
        .bind(now)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }
}
