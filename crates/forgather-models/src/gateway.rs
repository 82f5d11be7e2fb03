use serde::{Deserialize, Serialize};

use crate::subscription::Tier;

/// Business gateways offered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayId {
    Procurement,
    Marketing,
    CompanyFormation,
    Freelance,
    Investment,
}

/// Static descriptor for one gateway: configuration, not runtime state.
/// Titles and descriptions are locale keys resolved by the message catalog.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayConfig {
    pub id: GatewayId,
    pub title_key: &'static str,
    pub description_key: &'static str,
    pub required_tier: Tier,
    pub capabilities: &'static [&'static str],
}
