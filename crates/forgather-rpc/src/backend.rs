use chrono::{DateTime, Utc};
use uuid::Uuid;

use forgather_models::{
    ClientDashboard, DiscussionMessage, MessageType, SubscriptionStatus, SupplierDashboard,
    VotingSession, VotingSessionType,
};

use crate::protocol::CreateVotingSessionRequest;
use crate::RpcError;

/// Fields the caller supplies when creating a voting session. The backend
/// fills in ids, status and timestamps.
#[derive(Debug, Clone)]
pub struct VotingSessionDraft {
    pub title: String,
    pub description: Option<String>,
    pub session_type: VotingSessionType,
    pub phase: String,
    pub max_selections: u32,
    pub candidates: Vec<Uuid>,
    pub options: Vec<String>,
    pub deadline: DateTime<Utc>,
}

impl VotingSessionDraft {
    pub(crate) fn into_request(self, group_id: Uuid, created_by: Uuid) -> CreateVotingSessionRequest {
        CreateVotingSessionRequest {
            group_id,
            title: self.title,
            description: self.description,
            session_type: self.session_type,
            phase: self.phase,
            max_selections: self.max_selections,
            candidates: self.candidates,
            options: self.options,
            created_by,
            deadline: self.deadline,
        }
    }
}

/// The backend collaborator contract: one method per remote procedure.
///
/// All business rules (vote uniqueness, quorum, selection limits, point
/// ledger movements) are enforced by the implementation behind this trait;
/// callers treat every method as a single request/response round trip.
#[allow(async_fn_in_trait)]
pub trait Backend: Send + Sync {
    /// List the voting sessions of a group.
    async fn get_group_voting_sessions(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<VotingSession>, RpcError>;

    /// Create a voting session, returning its id.
    async fn create_voting_session(
        &self,
        group_id: Uuid,
        created_by: Uuid,
        draft: VotingSessionDraft,
    ) -> Result<Uuid, RpcError>;

    /// Submit a vote for `voter_id`. Returns the backend's success flag.
    async fn cast_vote(
        &self,
        voting_session_id: Uuid,
        voter_id: Uuid,
        selections: Vec<Uuid>,
        choice: Option<String>,
    ) -> Result<bool, RpcError>;

    /// List the discussion messages of a group, oldest first.
    async fn get_group_discussions(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<DiscussionMessage>, RpcError>;

    /// Post a discussion message, returning its id.
    async fn create_group_discussion(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        message: String,
        message_type: MessageType,
        parent_id: Option<Uuid>,
    ) -> Result<Uuid, RpcError>;

    /// Request membership in a group, returning the membership id. Point
    /// disposition (held vs deducted) happens remotely as part of this call.
    async fn join_group(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        accepted_terms: bool,
    ) -> Result<Uuid, RpcError>;

    /// Snapshot backing the client portal.
    async fn get_client_dashboard(&self, user_id: Uuid) -> Result<ClientDashboard, RpcError>;

    /// Snapshot backing the supplier portal.
    async fn get_supplier_dashboard(&self, user_id: Uuid) -> Result<SupplierDashboard, RpcError>;

    /// Current subscription tier of a user.
    async fn get_subscription_status(&self, user_id: Uuid)
        -> Result<SubscriptionStatus, RpcError>;
}
