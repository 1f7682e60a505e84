use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Subscription plan selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Plan {
    /// Free trial tier.
    Start,
    /// Monthly paid tier.
    Pro,
    /// Annual paid tier ("Jaar").
    Jaar,
}

impl Plan {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Start" => Some(Self::Start),
            "Pro" => Some(Self::Pro),
            "Jaar" => Some(Self::Jaar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Pro => "Pro",
            Self::Jaar => "Jaar",
        }
    }

    /// Checkout price in EUR. `None` for the free tier.
    pub fn price(&self) -> Option<Decimal> {
        match self {
            Self::Start => None,
            Self::Pro => Some(Decimal::new(14_99, 2)),
            Self::Jaar => Some(Decimal::new(119_00, 2)),
        }
    }

    /// Checkout line description shown on the hosted payment page.
    pub fn checkout_description(&self) -> Option<&'static str> {
        match self {
            Self::Start => None,
            Self::Pro => Some("LiftLog Pro - Maandelijkse toegang"),
            Self::Jaar => Some("LiftLog Jaar - Jaarlijkse toegang"),
        }
    }

    /// Length of the paid period granted by one confirmed payment.
    pub fn paid_period(&self) -> Option<Months> {
        match self {
            Self::Start => None,
            Self::Pro => Some(Months::new(1)),
            Self::Jaar => Some(Months::new(12)),
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's subscription state.
///
/// The store persists this as three columns (`subscription_tier`,
/// `subscription_status`, `subscription_expires_at`); this enum is the only
/// way the rest of the crate reads or writes them, so combinations like
/// "active with no tier" cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "tier")]
pub enum Subscription {
    /// Free trial, the state every new user starts in.
    #[serde(rename = "Start")]
    Trial,
    #[serde(rename = "Pro")]
    ActivePro { expires_at: DateTime<Utc> },
    #[serde(rename = "Jaar")]
    ActiveYear { expires_at: DateTime<Utc> },
    Expired,
    Cancelled,
}

impl Subscription {
    /// Decode the stored column triple.
    ///
    /// Total: rows that predate this representation, or that a migration
    /// mangled, decode to `Trial` rather than failing the whole read.
    pub fn from_columns(
        tier: &str,
        status: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        match status {
            "cancelled" => Self::Cancelled,
            "expired" => Self::Expired,
            "active" => match (Plan::parse(tier), expires_at) {
                (Some(Plan::Pro), Some(expires_at)) => Self::ActivePro { expires_at },
                (Some(Plan::Jaar), Some(expires_at)) => Self::ActiveYear { expires_at },
                _ => Self::Trial,
            },
            _ => Self::Trial,
        }
    }

    /// The column triple to persist for this state.
    pub fn to_columns(&self) -> (&'static str, &'static str, Option<DateTime<Utc>>) {
        match self {
            Self::Trial => ("Start", "active", None),
            Self::ActivePro { expires_at } => ("Pro", "active", Some(*expires_at)),
            Self::ActiveYear { expires_at } => ("Jaar", "active", Some(*expires_at)),
            Self::Expired => ("Start", "expired", None),
            Self::Cancelled => ("Start", "cancelled", None),
        }
    }

    /// Paid transition applied when the gateway confirms a payment.
    ///
    /// The expiry is always recomputed from `now`, never extended from the
    /// previous value, which keeps redelivered webhook events harmless.
    /// Returns `None` for the free tier or on calendar overflow.
    pub fn activate(plan: Plan, now: DateTime<Utc>) -> Option<Self> {
        let expires_at = now.checked_add_months(plan.paid_period()?)?;

        match plan {
            Plan::Pro => Some(Self::ActivePro { expires_at }),
            Plan::Jaar => Some(Self::ActiveYear { expires_at }),
            Plan::Start => None,
        }
    }

    /// The state as observed at `now`, with lazy expiry applied.
    ///
    /// Nothing sweeps `subscription_status` when `expires_at` passes; every
    /// reader of subscription state must go through this method.
    pub fn effective(&self, now: DateTime<Utc>) -> Self {
        match self {
            Self::ActivePro { expires_at } | Self::ActiveYear { expires_at }
                if *expires_at < now =>
            {
                Self::Expired
            }
            other => *other,
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        matches!(
            self.effective(now),
            Self::Trial | Self::ActivePro { .. } | Self::ActiveYear { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn column_round_trip() {
        let later = now() + Duration::days(30);
        for sub in [
            Subscription::Trial,
            Subscription::ActivePro { expires_at: later },
            Subscription::ActiveYear { expires_at: later },
            Subscription::Expired,
            Subscription::Cancelled,
        ] {
            let (tier, status, expires_at) = sub.to_columns();
            assert_eq!(Subscription::from_columns(tier, status, expires_at), sub);
        }
    }

    #[test]
    fn invalid_column_combinations_decode_to_trial() {
        assert_eq!(
            Subscription::from_columns("Pro", "active", None),
            Subscription::Trial
        );
        assert_eq!(
            Subscription::from_columns("Platinum", "active", Some(now())),
            Subscription::Trial
        );
        assert_eq!(
            Subscription::from_columns("", "nonsense", None),
            Subscription::Trial
        );
    }

    #[test]
    fn activate_pro_expires_in_one_month() {
        let t = now();
        let sub = Subscription::activate(Plan::Pro, t).unwrap();
        match sub {
            Subscription::ActivePro { expires_at } => {
                assert_eq!(expires_at, t.checked_add_months(Months::new(1)).unwrap());
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn activate_year_expires_in_twelve_months() {
        let t = now();
        let sub = Subscription::activate(Plan::Jaar, t).unwrap();
        match sub {
            Subscription::ActiveYear { expires_at } => {
                assert_eq!(expires_at, t.checked_add_months(Months::new(12)).unwrap());
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn activate_rejects_free_tier() {
        assert_eq!(Subscription::activate(Plan::Start, now()), None);
    }

    #[test]
    fn lazy_expiry_applies_to_past_expiries_only() {
        let t = now();
        let live = Subscription::ActivePro {
            expires_at: t + Duration::hours(1),
        };
        let stale = Subscription::ActivePro {
            expires_at: t - Duration::hours(1),
        };

        assert_eq!(live.effective(t), live);
        assert_eq!(stale.effective(t), Subscription::Expired);
        assert!(live.is_active(t));
        assert!(!stale.is_active(t));
    }

    #[test]
    fn trial_never_expires_lazily() {
        let t = now();
        assert_eq!(Subscription::Trial.effective(t), Subscription::Trial);
        assert!(Subscription::Trial.is_active(t));
    }

    #[test]
    fn plan_string_round_trip() {
        for plan in [Plan::Start, Plan::Pro, Plan::Jaar] {
            assert_eq!(Plan::parse(plan.as_str()), Some(plan));
        }
        assert_eq!(Plan::parse("pro"), None);
        assert_eq!(Plan::parse(""), None);
    }

    #[test]
    fn paid_plans_have_prices() {
        assert_eq!(Plan::Pro.price(), Some(Decimal::new(1499, 2)));
        assert_eq!(Plan::Jaar.price(), Some(Decimal::new(11900, 2)));
        assert_eq!(Plan::Start.price(), None);
    }
}
