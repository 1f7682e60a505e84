use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

/// User profile with subscription state as observed at request time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub subscription_tier: String,
    pub subscription_status: String,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    /// Build the response, applying lazy expiry to the stored status.
    ///
    /// An active subscription whose expiry has passed is reported as
    /// `expired` even though no store write has happened yet.
    pub fn from_user_at(user: User, now: DateTime<Utc>) -> Self {
        let (_, status, _) = user.subscription().effective(now).to_columns();

        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_image_url: user.profile_image_url,
            subscription_tier: user.subscription_tier,
            subscription_status: status.to_string(),
            subscription_expires_at: user.subscription_expires_at,
            created_at: user.created_at,
        }
    }
}
