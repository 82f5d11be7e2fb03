use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use forgather_models::{VotingSession, VotingSessionType};
use forgather_rpc::backend::VotingSessionDraft;
use forgather_rpc::protocol::calls;
use forgather_rpc::Backend;

use crate::error::CoreError;
use crate::notify::{Notifier, Severity};
use crate::{observability, AppContext};

/// Voting sessions for the groups the user is browsing.
///
/// The cache is transient and refetch-only: a successful write triggers a
/// full re-fetch of the group's sessions, never an optimistic update, and a
/// failed call leaves the cache exactly as it was.
pub struct VotingWorkflow<B, N> {
    ctx: Arc<AppContext<B, N>>,
    sessions: DashMap<Uuid, Vec<VotingSession>>,
    loading: AtomicBool,
}

impl<B: Backend, N: Notifier> VotingWorkflow<B, N> {
    pub fn new(ctx: Arc<AppContext<B, N>>) -> Self {
        Self {
            ctx,
            sessions: DashMap::new(),
            loading: AtomicBool::new(false),
        }
    }

    /// Sessions last fetched for `group_id`; empty until the first fetch.
    pub fn sessions(&self, group_id: Uuid) -> Vec<VotingSession> {
        self.sessions
            .get(&group_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    pub async fn fetch_sessions(&self, group_id: Uuid) -> Result<Vec<VotingSession>, CoreError> {
        self.loading.store(true, Ordering::Relaxed);
        observability::rpc_issued(calls::GET_GROUP_VOTING_SESSIONS);
        let result = self.ctx.backend.get_group_voting_sessions(group_id).await;
        self.loading.store(false, Ordering::Relaxed);

        match result {
            Ok(sessions) => {
                self.sessions.insert(group_id, sessions.clone());
                Ok(sessions)
            }
            Err(err) => {
                observability::rpc_failed(calls::GET_GROUP_VOTING_SESSIONS);
                let err = CoreError::from(err);
                self.ctx.notify_error(&err);
                Err(err)
            }
        }
    }

    /// Submit a vote in a session previously loaded via `fetch_sessions`.
    ///
    /// Rejected locally, before any network call, when nobody is signed in,
    /// the session is unknown or closed, or `selections` exceeds the
    /// session's `max_selections`. The backend remains authoritative for
    /// everything else (vote uniqueness, quorum).
    pub async fn cast_vote(
        &self,
        group_id: Uuid,
        session_id: Uuid,
        selections: Vec<Uuid>,
        choice: Option<String>,
    ) -> Result<(), CoreError> {
        let Some(user) = self.ctx.session.current_user() else {
            let err = CoreError::LoginRequired;
            self.ctx.notify_error(&err);
            return Err(err);
        };
        if let Err(err) = self.validate_against_cached(group_id, session_id, &selections) {
            self.ctx.notify_error(&err);
            return Err(err);
        }

        observability::rpc_issued(calls::CAST_VOTE);
        match self
            .ctx
            .backend
            .cast_vote(session_id, user.id, selections, choice)
            .await
        {
            Ok(true) => {
                self.ctx.notify(Severity::Success, "vote.submitted");
                // Refetch failures notify on their own; the vote itself stood.
                let _ = self.fetch_sessions(group_id).await;
                Ok(())
            }
            Ok(false) => {
                let err = CoreError::VoteRejected;
                self.ctx.notify_error(&err);
                Err(err)
            }
            Err(err) => {
                observability::rpc_failed(calls::CAST_VOTE);
                let err = CoreError::from(err);
                self.ctx.notify_error(&err);
                Err(err)
            }
        }
    }

    /// Create a session after local required-field validation, then refetch.
    pub async fn create_session(
        &self,
        group_id: Uuid,
        draft: VotingSessionDraft,
    ) -> Result<Uuid, CoreError> {
        let Some(user) = self.ctx.session.current_user() else {
            let err = CoreError::LoginRequired;
            self.ctx.notify_error(&err);
            return Err(err);
        };
        if let Err(err) = validate_draft(&draft) {
            self.ctx.notify_error(&err);
            return Err(err);
        }

        observability::rpc_issued(calls::CREATE_VOTING_SESSION);
        match self
            .ctx
            .backend
            .create_voting_session(group_id, user.id, draft)
            .await
        {
            Ok(session_id) => {
                self.ctx.notify(Severity::Success, "vote.session_created");
                let _ = self.fetch_sessions(group_id).await;
                Ok(session_id)
            }
            Err(err) => {
                observability::rpc_failed(calls::CREATE_VOTING_SESSION);
                let err = CoreError::from(err);
                self.ctx.notify_error(&err);
                Err(err)
            }
        }
    }

    fn validate_against_cached(
        &self,
        group_id: Uuid,
        session_id: Uuid,
        selections: &[Uuid],
    ) -> Result<(), CoreError> {
        let session = self
            .sessions
            .get(&group_id)
            .and_then(|entry| entry.iter().find(|s| s.id == session_id).cloned())
            .ok_or(CoreError::UnknownSession)?;

        if !session.accepts_votes_at(Utc::now()) {
            return Err(CoreError::SessionClosed);
        }
        if selections.len() > session.max_selections as usize {
            return Err(CoreError::TooManySelections {
                selected: selections.len(),
                max: session.max_selections,
            });
        }
        Ok(())
    }
}

fn validate_draft(draft: &VotingSessionDraft) -> Result<(), CoreError> {
    if draft.title.trim().is_empty() {
        return Err(CoreError::Validation("title is required"));
    }
    if draft.max_selections == 0 {
        return Err(CoreError::Validation("max_selections must be at least 1"));
    }
    if draft.deadline <= Utc::now() {
        return Err(CoreError::Validation("deadline must be in the future"));
    }
    match draft.session_type {
        VotingSessionType::AdminElection if draft.candidates.is_empty() => {
            Err(CoreError::Validation("an election needs candidates"))
        }
        VotingSessionType::Decision | VotingSessionType::ContractApproval
            if draft.options.is_empty() =>
        {
            Err(CoreError::Validation("a decision needs options"))
        }
        _ => Ok(()),
    }
}
