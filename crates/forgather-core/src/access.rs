use forgather_models::{SubscriptionStatus, Tier};

/// UI-side visibility gate. This is cosmetic: it decides what to render,
/// while the backend re-checks entitlements on every procedure it protects.
pub fn check_access(status: &SubscriptionStatus, required: Tier) -> bool {
    status.effective_tier() >= required
}
