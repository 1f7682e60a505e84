use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::{Subscription, User};

const USER_COLUMNS: &str = "id, email, first_name, last_name, profile_image_url, \
     subscription_tier, subscription_status, subscription_expires_at, \
     payment_customer_ref, created_at, updated_at";

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    /// Insert the user on first authentication.
    ///
    /// New rows start on the schema defaults (Start trial, active); later
    /// calls only touch `updated_at` and fill in still-missing profile
    /// fields, never the subscription columns.
    pub async fn upsert(
        &self,
        id: &str,
        email: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
        profile_image_url: Option<&str>,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, email, first_name, last_name, profile_image_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                email = COALESCE(users.email, EXCLUDED.email),
                first_name = COALESCE(users.first_name, EXCLUDED.first_name),
                last_name = COALESCE(users.last_name, EXCLUDED.last_name),
                profile_image_url = COALESCE(users.profile_image_url, EXCLUDED.profile_image_url),
                updated_at = now()
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(profile_image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Replace the subscription columns in one atomic row update.
    ///
    /// This is the only write path for subscription state; concurrent
    /// webhook redeliveries each apply a full consistent triple, so there is
    /// no read-modify-write window to lose.
    pub async fn update_subscription(
        &self,
        id: &str,
        subscription: &Subscription,
        customer_ref: Option<&str>,
    ) -> Result<()> {
        let (tier, status, expires_at) = subscription.to_columns();

        let result = sqlx::query(
            r#"
            UPDATE users
            SET subscription_tier = $2,
                subscription_status = $3,
                subscription_expires_at = $4,
                payment_customer_ref = COALESCE($5, payment_customer_ref),
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(tier)
        .bind(status)
        .bind(expires_at)
        .bind(customer_ref)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
