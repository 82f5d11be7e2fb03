use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use forgather_models::Group;
use forgather_rpc::protocol::calls;
use forgather_rpc::Backend;

use crate::error::CoreError;
use crate::notify::{Notifier, Severity};
use crate::{observability, AppContext};

/// How the join cost is presented to the user. The actual ledger movement
/// happens remotely inside the `join_group` procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointDisposition {
    HeldUntilActivation,
    DeductedImmediately,
}

impl PointDisposition {
    pub fn message_key(self) -> &'static str {
        match self {
            PointDisposition::HeldUntilActivation => "join.points_held",
            PointDisposition::DeductedImmediately => "join.points_deducted",
        }
    }
}

/// State behind the join-confirmation dialog: explicit terms acceptance
/// gates the confirm action, whatever the rest of the form looks like.
pub struct JoinGroupGate<B, N> {
    ctx: Arc<AppContext<B, N>>,
    group: Group,
    terms_accepted: AtomicBool,
}

impl<B: Backend, N: Notifier> JoinGroupGate<B, N> {
    pub fn new(ctx: Arc<AppContext<B, N>>, group: Group) -> Self {
        Self {
            ctx,
            group,
            terms_accepted: AtomicBool::new(false),
        }
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn set_terms_accepted(&self, accepted: bool) {
        self.terms_accepted.store(accepted, Ordering::Relaxed);
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted.load(Ordering::Relaxed)
    }

    /// Confirm is enabled only once the terms checkbox is ticked.
    pub fn can_confirm(&self) -> bool {
        self.terms_accepted()
    }

    pub fn point_disposition(&self) -> PointDisposition {
        if self.group.deducts_points_on_join() {
            PointDisposition::DeductedImmediately
        } else {
            PointDisposition::HeldUntilActivation
        }
    }

    /// Submit the join request, returning the new membership id.
    pub async fn confirm(&self) -> Result<Uuid, CoreError> {
        if !self.can_confirm() {
            let err = CoreError::TermsNotAccepted;
            self.ctx.notify_error(&err);
            return Err(err);
        }
        let Some(user) = self.ctx.session.current_user() else {
            let err = CoreError::LoginRequired;
            self.ctx.notify_error(&err);
            return Err(err);
        };

        observability::rpc_issued(calls::JOIN_GROUP);
        match self
            .ctx
            .backend
            .join_group(self.group.id, user.id, true)
            .await
        {
            Ok(membership_id) => {
                self.ctx.notify(Severity::Success, "join.requested");
                Ok(membership_id)
            }
            Err(err) => {
                observability::rpc_failed(calls::JOIN_GROUP);
                let err = CoreError::from(err);
                self.ctx.notify_error(&err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{signed_in_ctx, signed_out_ctx};
    use chrono::Utc;
    use forgather_models::{GroupStatus, GroupType};

    fn group(status: GroupStatus) -> Group {
        Group {
            id: Uuid::new_v4(),
            name: "مجموعة شراء الأجهزة".to_string(),
            description: None,
            group_type: GroupType::Procurement,
            status,
            member_count: 12,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn confirm_is_gated_on_terms_regardless_of_login() {
        let (ctx, backend, _notifier) = signed_in_ctx();
        let gate = JoinGroupGate::new(ctx, group(GroupStatus::PendingMembers));

        assert!(!gate.can_confirm());
        let result = gate.confirm().await;
        assert!(matches!(result, Err(CoreError::TermsNotAccepted)));
        assert_eq!(backend.calls(), 0);

        gate.set_terms_accepted(true);
        assert!(gate.can_confirm());
        gate.set_terms_accepted(false);
        assert!(!gate.can_confirm());
    }

    #[tokio::test]
    async fn pending_groups_hold_points_active_groups_deduct() {
        let (ctx, _backend, _notifier) = signed_in_ctx();
        let pending = JoinGroupGate::new(ctx.clone(), group(GroupStatus::PendingMembers));
        assert_eq!(
            pending.point_disposition(),
            PointDisposition::HeldUntilActivation
        );

        let active = JoinGroupGate::new(ctx, group(GroupStatus::Active));
        assert_eq!(
            active.point_disposition(),
            PointDisposition::DeductedImmediately
        );
        assert_eq!(active.point_disposition().message_key(), "join.points_deducted");
    }

    #[tokio::test]
    async fn confirm_requires_login_after_terms() {
        let (ctx, backend, notifier) = signed_out_ctx();
        let gate = JoinGroupGate::new(ctx, group(GroupStatus::Active));
        gate.set_terms_accepted(true);

        let result = gate.confirm().await;
        assert!(matches!(result, Err(CoreError::LoginRequired)));
        assert_eq!(backend.calls(), 0);
        assert_eq!(notifier.emitted()[0].key, "auth.login_required");
    }

    #[tokio::test]
    async fn confirm_joins_and_notifies_success() {
        let (ctx, backend, notifier) = signed_in_ctx();
        let gate = JoinGroupGate::new(ctx, group(GroupStatus::PendingMembers));
        gate.set_terms_accepted(true);

        gate.confirm().await.unwrap();
        assert_eq!(backend.calls(), 1);
        assert_eq!(notifier.count_of(Severity::Success), 1);
    }

    #[tokio::test]
    async fn failed_join_emits_exactly_one_toast() {
        let (ctx, backend, notifier) = signed_in_ctx();
        let gate = JoinGroupGate::new(ctx, group(GroupStatus::Active));
        gate.set_terms_accepted(true);
        backend.fail_with_network_error(true);

        let result = gate.confirm().await;
        assert!(matches!(result, Err(CoreError::Rpc(_))));
        assert_eq!(notifier.count_of(Severity::Error), 1);
    }
}
