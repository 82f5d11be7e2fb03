//! In-memory backend double for workflow tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use forgather_models::{
    ClientDashboard, DiscussionMessage, MessageType, SubscriptionStatus, SupplierDashboard,
    VotingSession, VotingSessionStatus, VotingSessionType,
};
use forgather_rpc::backend::VotingSessionDraft;
use forgather_rpc::{Backend, RpcError};

use crate::config::ClientConfig;
use crate::notify::RecordingNotifier;
use crate::session::CurrentUser;
use crate::AppContext;

#[derive(Default)]
struct MockState {
    sessions: Mutex<Vec<VotingSession>>,
    discussions: Mutex<Vec<DiscussionMessage>>,
    client_dashboard: Mutex<Option<ClientDashboard>>,
    supplier_dashboard: Mutex<Option<SupplierDashboard>>,
    fail_network: AtomicBool,
    reject_votes: AtomicBool,
    calls: AtomicUsize,
}

/// Backend double: serves from in-memory stores, counts every call, and can
/// be switched into a failing mode mid-test.
#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    inner: Arc<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_session(&self, session: VotingSession) {
        self.inner.sessions.lock().unwrap().push(session);
    }

    pub fn push_message(&self, message: DiscussionMessage) {
        self.inner.discussions.lock().unwrap().push(message);
    }

    pub fn set_client_dashboard(&self, dashboard: ClientDashboard) {
        *self.inner.client_dashboard.lock().unwrap() = Some(dashboard);
    }

    pub fn set_supplier_dashboard(&self, dashboard: SupplierDashboard) {
        *self.inner.supplier_dashboard.lock().unwrap() = Some(dashboard);
    }

    pub fn fail_with_network_error(&self, failing: bool) {
        self.inner.fail_network.store(failing, Ordering::Relaxed);
    }

    pub fn reject_votes(&self, rejecting: bool) {
        self.inner.reject_votes.store(rejecting, Ordering::Relaxed);
    }

    /// Total backend calls issued, including failed ones.
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::Relaxed)
    }

    fn begin_call(&self) -> Result<(), RpcError> {
        self.inner.calls.fetch_add(1, Ordering::Relaxed);
        if self.inner.fail_network.load(Ordering::Relaxed) {
            Err(RpcError::Http("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Backend for MockBackend {
    async fn get_group_voting_sessions(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<VotingSession>, RpcError> {
        self.begin_call()?;
        Ok(self
            .inner
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn create_voting_session(
        &self,
        group_id: Uuid,
        _created_by: Uuid,
        draft: VotingSessionDraft,
    ) -> Result<Uuid, RpcError> {
        self.begin_call()?;
        let session = VotingSession {
            id: Uuid::new_v4(),
            group_id,
            title: draft.title,
            description: draft.description,
            session_type: draft.session_type,
            phase: draft.phase,
            max_selections: draft.max_selections,
            candidates: draft.candidates,
            options: draft.options,
            status: VotingSessionStatus::Active,
            deadline: draft.deadline,
            results: None,
            created_at: Utc::now(),
        };
        let id = session.id;
        self.inner.sessions.lock().unwrap().push(session);
        Ok(id)
    }

    async fn cast_vote(
        &self,
        _voting_session_id: Uuid,
        _voter_id: Uuid,
        _selections: Vec<Uuid>,
        _choice: Option<String>,
    ) -> Result<bool, RpcError> {
        self.begin_call()?;
        Ok(!self.inner.reject_votes.load(Ordering::Relaxed))
    }

    async fn get_group_discussions(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<DiscussionMessage>, RpcError> {
        self.begin_call()?;
        Ok(self
            .inner
            .discussions
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn create_group_discussion(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        message: String,
        message_type: MessageType,
        parent_id: Option<Uuid>,
    ) -> Result<Uuid, RpcError> {
        self.begin_call()?;
        let message = DiscussionMessage {
            id: Uuid::new_v4(),
            group_id,
            user_id,
            message,
            message_type,
            parent_id,
            created_at: Utc::now(),
        };
        let id = message.id;
        self.inner.discussions.lock().unwrap().push(message);
        Ok(id)
    }

    async fn join_group(
        &self,
        _group_id: Uuid,
        _user_id: Uuid,
        _accepted_terms: bool,
    ) -> Result<Uuid, RpcError> {
        self.begin_call()?;
        Ok(Uuid::new_v4())
    }

    async fn get_client_dashboard(&self, _user_id: Uuid) -> Result<ClientDashboard, RpcError> {
        self.begin_call()?;
        Ok(self
            .inner
            .client_dashboard
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(ClientDashboard {
                groups: vec![],
                invoices: vec![],
                points_balance: 0,
                points_held: 0,
            }))
    }

    async fn get_supplier_dashboard(&self, _user_id: Uuid) -> Result<SupplierDashboard, RpcError> {
        self.begin_call()?;
        Ok(self
            .inner
            .supplier_dashboard
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(SupplierDashboard {
                open_rfqs: vec![],
                submitted_quotes: vec![],
            }))
    }

    async fn get_subscription_status(
        &self,
        _user_id: Uuid,
    ) -> Result<SubscriptionStatus, RpcError> {
        self.begin_call()?;
        Ok(SubscriptionStatus::default())
    }
}

pub(crate) fn active_session(group_id: Uuid, max_selections: u32) -> VotingSession {
    VotingSession {
        id: Uuid::new_v4(),
        group_id,
        title: "Elect group admins".to_string(),
        description: None,
        session_type: VotingSessionType::AdminElection,
        phase: "formation".to_string(),
        max_selections,
        candidates: (0..3).map(|_| Uuid::new_v4()).collect(),
        options: vec![],
        status: VotingSessionStatus::Active,
        deadline: Utc::now() + Duration::days(1),
        results: None,
        created_at: Utc::now(),
    }
}

pub(crate) fn draft() -> VotingSessionDraft {
    VotingSessionDraft {
        title: "Approve supplier contract".to_string(),
        description: None,
        session_type: VotingSessionType::Decision,
        phase: "negotiation".to_string(),
        max_selections: 1,
        candidates: vec![],
        options: vec!["approve".to_string(), "reject".to_string()],
        deadline: Utc::now() + Duration::days(3),
    }
}

pub(crate) fn discussion_message(group_id: Uuid) -> DiscussionMessage {
    DiscussionMessage {
        id: Uuid::new_v4(),
        group_id,
        user_id: Uuid::new_v4(),
        message: "أقترح مورداً بديلاً".to_string(),
        message_type: MessageType::Suggestion,
        parent_id: None,
        created_at: Utc::now(),
    }
}

type TestContext = (
    Arc<AppContext<MockBackend, Arc<RecordingNotifier>>>,
    MockBackend,
    Arc<RecordingNotifier>,
);

pub(crate) fn signed_out_ctx() -> TestContext {
    let backend = MockBackend::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = AppContext::new(ClientConfig::default(), backend.clone(), notifier.clone());
    (ctx, backend, notifier)
}

pub(crate) fn signed_in_ctx() -> TestContext {
    let (ctx, backend, notifier) = signed_out_ctx();
    ctx.session.sign_in(CurrentUser {
        id: Uuid::new_v4(),
        display_name: "Huda".to_string(),
        access_token: "test-jwt".to_string(),
    });
    (ctx, backend, notifier)
}
