use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingSessionType {
    AdminElection,
    Decision,
    ContractApproval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingSessionStatus {
    Active,
    Completed,
    Cancelled,
}

/// A voting session as returned by the backend. Tally and uniqueness rules
/// are enforced remotely; `results` is opaque JSON shaped per session type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingSession {
    pub id: Uuid,
    pub group_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub session_type: VotingSessionType,
    pub phase: String,
    pub max_selections: u32,
    /// Candidate user IDs (admin elections) or option owners.
    #[serde(default)]
    pub candidates: Vec<Uuid>,
    /// Free-form option labels (decision / contract approval sessions).
    #[serde(default)]
    pub options: Vec<String>,
    pub status: VotingSessionStatus,
    pub deadline: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl VotingSession {
    /// A session accepts votes only while active and before its deadline.
    pub fn accepts_votes_at(&self, now: DateTime<Utc>) -> bool {
        self.status == VotingSessionStatus::Active && now < self.deadline
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    pub voting_session_id: Uuid,
    pub voter_id: Uuid,
    #[serde(default)]
    pub selections: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<String>,
}
