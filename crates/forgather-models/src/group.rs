use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Business vertical a group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    Procurement,
    Marketing,
    CompanyFormation,
    Freelance,
}

/// Lifecycle status. Transitions are decided by the backend; clients only
/// read this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    PendingMembers,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub group_type: GroupType,
    pub status: GroupStatus,
    pub member_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Whether the point cost of joining is deducted immediately rather than
    /// held until the group forms.
    pub fn deducts_points_on_join(&self) -> bool {
        self.status == GroupStatus::Active
    }
}
