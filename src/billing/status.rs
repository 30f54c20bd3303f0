use chrono::{DateTime, Months, Utc};
use serde::Serialize;

use crate::database::models::UserSubscription;
use crate::plans::PlanDuration;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Effective state of a user's subscription at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    None,
    Active,
    Expired,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn evaluate(subscription: Option<&UserSubscription>, now: DateTime<Utc>) -> Self {
        let Some(subscription) = subscription else {
            return Self::None;
        };

        if subscription.status == STATUS_CANCELLED {
            return Self::Cancelled;
        }

        match subscription.expires_at {
            Some(expires_at) if expires_at <= now => Self::Expired,
            _ => Self::Active,
        }
    }
}

/// End of a paid period starting at `start`; `None` for plans that never lapse
pub fn period_end(start: DateTime<Utc>, duration: PlanDuration) -> Option<DateTime<Utc>> {
    duration
        .months()
        .and_then(|months| start.checked_add_months(Months::new(months)))
}
