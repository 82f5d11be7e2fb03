use forgather_models::{GatewayConfig, GatewayId, SubscriptionStatus, Tier};

use crate::access::check_access;

/// The platform's business gateways. Static configuration; runtime state
/// (groups, RFQs) lives behind the backend contract.
pub const CATALOG: &[GatewayConfig] = &[
    GatewayConfig {
        id: GatewayId::Procurement,
        title_key: "gateway.procurement.title",
        description_key: "gateway.procurement.description",
        required_tier: Tier::Free,
        capabilities: &["groups", "voting", "discussions", "rfq"],
    },
    GatewayConfig {
        id: GatewayId::Marketing,
        title_key: "gateway.marketing.title",
        description_key: "gateway.marketing.description",
        required_tier: Tier::Basic,
        capabilities: &["groups", "voting", "discussions"],
    },
    GatewayConfig {
        id: GatewayId::CompanyFormation,
        title_key: "gateway.company_formation.title",
        description_key: "gateway.company_formation.description",
        required_tier: Tier::Premium,
        capabilities: &["groups", "voting", "contracts"],
    },
    GatewayConfig {
        id: GatewayId::Freelance,
        title_key: "gateway.freelance.title",
        description_key: "gateway.freelance.description",
        required_tier: Tier::Free,
        capabilities: &["groups", "rfq"],
    },
    GatewayConfig {
        id: GatewayId::Investment,
        title_key: "gateway.investment.title",
        description_key: "gateway.investment.description",
        required_tier: Tier::Enterprise,
        capabilities: &["groups", "voting", "contracts"],
    },
];

pub fn find(id: GatewayId) -> Option<&'static GatewayConfig> {
    CATALOG.iter().find(|gateway| gateway.id == id)
}

/// Gateways the given subscription may enter, in catalog order.
pub fn enabled_gateways(status: &SubscriptionStatus) -> Vec<&'static GatewayConfig> {
    CATALOG
        .iter()
        .filter(|gateway| check_access(status, gateway.required_tier))
        .collect()
}
