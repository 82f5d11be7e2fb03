pub mod access;
pub mod config;
pub mod discussions;
pub mod error;
pub mod gateway;
pub mod locale;
pub mod membership;
pub mod notify;
pub mod observability;
pub mod portal;
pub mod session;
pub mod voting;

#[cfg(test)]
pub(crate) mod testutil;

use std::sync::Arc;

use uuid::Uuid;

use forgather_models::SubscriptionStatus;
use forgather_rpc::{Backend, RpcClient};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::locale::LocaleState;
use crate::notify::{BroadcastNotifier, Notification, Notifier, Severity};
use crate::session::{AuthSession, CurrentUser};

/// Cached subscription lookups: 5-minute TTL, bounded. The cache is cosmetic
/// (UI gating); the backend stays authoritative for entitlements.
pub fn build_subscription_cache() -> moka::future::Cache<Uuid, SubscriptionStatus> {
    moka::future::Cache::builder()
        .max_capacity(10_000)
        .time_to_live(std::time::Duration::from_secs(300))
        .build()
}

/// Shared state injected into every workflow: the backend collaborator, the
/// authenticated session, locale, and the notification sink. Explicitly
/// scoped and passed by handle, never ambient.
pub struct AppContext<B, N> {
    pub backend: B,
    pub config: ClientConfig,
    pub session: AuthSession,
    pub locale: LocaleState,
    pub notifier: N,
    subscription_cache: moka::future::Cache<Uuid, SubscriptionStatus>,
}

impl<B: Backend, N: Notifier> AppContext<B, N> {
    pub fn new(config: ClientConfig, backend: B, notifier: N) -> Arc<Self> {
        let locale = LocaleState::new(config.default_language);
        Arc::new(Self {
            backend,
            config,
            session: AuthSession::default(),
            locale,
            notifier,
            subscription_cache: build_subscription_cache(),
        })
    }

    /// Emit a localized notification for `key` in the current language.
    pub fn notify(&self, severity: Severity, key: &'static str) {
        let message = self.locale.text(key);
        observability::notification_emitted();
        self.notifier.notify(Notification {
            severity,
            key,
            message,
        });
    }

    pub(crate) fn notify_error(&self, err: &CoreError) {
        // Local rejections are user input, not system trouble; keep them
        // out of the warn stream.
        if err.is_local() {
            tracing::debug!(error = %err, "action rejected before any call");
        } else {
            tracing::warn!(error = %err, "workflow action failed");
        }
        self.notify(Severity::Error, err.message_key());
    }

    /// Subscription status for `user_id`, served from the TTL cache when
    /// warm. A cold lookup that fails falls back to the free default so the
    /// UI can still render; no notification is emitted for this path.
    pub async fn subscription_status(&self, user_id: Uuid) -> SubscriptionStatus {
        if let Some(status) = self.subscription_cache.get(&user_id).await {
            return status;
        }
        observability::rpc_issued(forgather_rpc::protocol::calls::GET_SUBSCRIPTION_STATUS);
        match self.backend.get_subscription_status(user_id).await {
            Ok(status) => {
                self.subscription_cache.insert(user_id, status.clone()).await;
                status
            }
            Err(err) => {
                observability::rpc_failed(forgather_rpc::protocol::calls::GET_SUBSCRIPTION_STATUS);
                tracing::warn!(error = %err, "subscription lookup failed, assuming free tier");
                SubscriptionStatus::default()
            }
        }
    }
}

/// Wire an application context against the live backend. When `user` is
/// given, their access token is attached to every subsequent call and the
/// session starts signed in.
pub fn connect(
    config: ClientConfig,
    user: Option<CurrentUser>,
) -> anyhow::Result<Arc<AppContext<RpcClient, BroadcastNotifier>>> {
    let mut client = RpcClient::with_timeout(
        &config.backend_url,
        config.api_key.clone(),
        config.request_timeout(),
    )?;
    if let Some(user) = &user {
        client = client.with_access_token(user.access_token.clone());
    }
    let ctx = AppContext::new(config, client, BroadcastNotifier::new(64));
    if let Some(user) = user {
        ctx.session.sign_in(user);
    }
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::signed_in_ctx;
    use uuid::Uuid;

    #[tokio::test]
    async fn subscription_lookups_are_cached() {
        let (ctx, backend, _notifier) = signed_in_ctx();
        let user_id = Uuid::new_v4();

        ctx.subscription_status(user_id).await;
        ctx.subscription_status(user_id).await;
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn failed_subscription_lookup_degrades_to_free_without_toast() {
        let (ctx, backend, notifier) = signed_in_ctx();
        backend.fail_with_network_error(true);

        let status = ctx.subscription_status(Uuid::new_v4()).await;
        assert_eq!(status.effective_tier(), forgather_models::Tier::Free);
        assert!(notifier.emitted().is_empty());
    }

    #[test]
    fn connect_signs_the_user_in() {
        let user = CurrentUser {
            id: Uuid::new_v4(),
            display_name: "Huda".to_string(),
            access_token: "jwt".to_string(),
        };
        let ctx = connect(ClientConfig::default(), Some(user.clone())).unwrap();
        assert_eq!(ctx.session.current_user().unwrap().id, user.id);
        assert_eq!(ctx.locale.language(), forgather_models::Language::Ar);
    }
}
