use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::Result;

/// One completed set's contribution to training volume.
///
/// Weight and reps are kept optional because sets can be logged without
/// either; a missing value counts as zero, it does not drop the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSet {
    pub weight: Option<Decimal>,
    pub reps: Option<i32>,
}

/// Read interface the engine derives its metrics from.
///
/// Implementations must scope every query to the given user; the engine
/// never aggregates across users.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Sets with `completed = true` whose parent session belongs to the user
    /// and falls in `[from, to)`.
    async fn completed_sets_between(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CompletedSet>>;

    /// Day-granularity dates of the user's completed sessions, newest first.
    async fn completed_session_days(&self, user_id: &str) -> Result<Vec<NaiveDate>>;
}

/// Derives weekly training volume and the workout streak for a user.
///
/// Stateless: both metrics are recomputed from the store on every call.
#[derive(Clone)]
pub struct AnalyticsEngine {
    store: Arc<dyn AnalyticsStore>,
}

impl AnalyticsEngine {
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self { store }
    }

    /// Total `weight × reps` over completed sets in `[week_start, week_start + 7 days)`.
    pub async fn weekly_volume(&self, user_id: &str, week_start: DateTime<Utc>) -> Result<Decimal> {
        let week_end = week_start + Duration::days(7);
        let sets = self
            .store
            .completed_sets_between(user_id, week_start, week_end)
            .await?;

        Ok(volume_of(&sets))
    }

    /// Consecutive-day count of completed sessions ending today or yesterday.
    pub async fn workout_streak(&self, user_id: &str) -> Result<u32> {
        let days = self.store.completed_session_days(user_id).await?;
        Ok(streak_from_days(Utc::now().date_naive(), &days))
    }
}

/// Sum of `weight × reps`, coalescing missing values to zero.
pub fn volume_of(sets: &[CompletedSet]) -> Decimal {
    sets.iter()
        .map(|set| {
            set.weight.unwrap_or(Decimal::ZERO) * Decimal::from(set.reps.unwrap_or(0))
        })
        .sum()
}

/// Walk the descending day list and count the streak.
///
/// The first counted session may be today or yesterday; after that each
/// session must fall exactly one calendar day before the previously counted
/// one. Any other gap (including a same-day duplicate) stops the walk.
pub fn streak_from_days(today: NaiveDate, days_desc: &[NaiveDate]) -> u32 {
    let mut streak = 0u32;
    let mut cursor = today;

    for &day in days_desc {
        let gap = (cursor - day).num_days();
        let extends = if streak == 0 { gap == 0 || gap == 1 } else { gap == 1 };

        if !extends {
            break;
        }

        streak += 1;
        cursor = day;
    }

    streak
}
