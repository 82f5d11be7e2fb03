use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use forgather_models::{MessageType, VotingSessionType};

/// Wire-level procedure names. These are the stable part of the backend
/// contract; request/response bodies below must round-trip against them
/// bit-exactly.
pub mod calls {
    pub const GET_GROUP_VOTING_SESSIONS: &str = "get_group_voting_sessions";
    pub const CREATE_VOTING_SESSION: &str = "create_voting_session";
    pub const CAST_VOTE: &str = "cast_vote";
    pub const GET_GROUP_DISCUSSIONS: &str = "get_group_discussions";
    pub const CREATE_GROUP_DISCUSSION: &str = "create_group_discussion";
    pub const JOIN_GROUP: &str = "join_group";
    pub const GET_CLIENT_DASHBOARD: &str = "get_client_dashboard";
    pub const GET_SUPPLIER_DASHBOARD: &str = "get_supplier_dashboard";
    pub const GET_SUBSCRIPTION_STATUS: &str = "get_subscription_status";
}

/// Error body returned by the backend for a rejected procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFault {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupScopedRequest {
    pub group_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserScopedRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVotingSessionRequest {
    pub group_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub session_type: VotingSessionType,
    pub phase: String,
    pub max_selections: u32,
    #[serde(default)]
    pub candidates: Vec<Uuid>,
    #[serde(default)]
    pub options: Vec<String>,
    pub created_by: Uuid,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVotingSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastVoteRequest {
    pub voting_session_id: Uuid,
    pub voter_id: Uuid,
    #[serde(default)]
    pub selections: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastVoteResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDiscussionRequest {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub message_type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDiscussionResponse {
    pub message_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGroupRequest {
    pub group_id: Uuid,
    pub user_id: Uuid,
    /// Explicit terms acceptance collected by the join dialog. The backend
    /// rejects joins submitted without it.
    pub accepted_terms: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGroupResponse {
    pub membership_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_vote_request_omits_empty_choice() {
        let req = CastVoteRequest {
            voting_session_id: Uuid::nil(),
            voter_id: Uuid::nil(),
            selections: vec![],
            choice: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("choice").is_none());
        assert!(json.get("selections").is_some());
    }

    #[test]
    fn session_type_uses_snake_case_wire_names() {
        let json = serde_json::to_string(&VotingSessionType::AdminElection).unwrap();
        assert_eq!(json, "\"admin_election\"");
        let json = serde_json::to_string(&VotingSessionType::ContractApproval).unwrap();
        assert_eq!(json, "\"contract_approval\"");
    }

    #[test]
    fn remote_fault_round_trips() {
        let fault: RemoteFault =
            serde_json::from_str(r#"{"code":"P0001","message":"quorum not met"}"#).unwrap();
        assert_eq!(fault.code, "P0001");
        assert_eq!(fault.message, "quorum not met");
    }
}
