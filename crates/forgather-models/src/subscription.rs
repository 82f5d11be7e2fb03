use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access level gating feature visibility. Variant order defines the tier
/// ordering used by access checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Basic,
    Premium,
    Enterprise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub tier: Tier,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SubscriptionStatus {
    /// An inactive subscription is treated as the free tier.
    pub fn effective_tier(&self) -> Tier {
        if self.active { self.tier } else { Tier::Free }
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        Self {
            tier: Tier::Free,
            active: true,
            expires_at: None,
        }
    }
}
