use sqlx::PgPool;
use storage::{error::Result, models::User, repository::user::UserRepository};

/// Fetch the caller's user row, creating it on first authentication.
pub async fn current_user(pool: &PgPool, user_id: &str) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.upsert(user_id, None, None, None, None).await
}
