use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// The fixed set of named zones a complaint can be filed against.
pub const DISTRICTS: [&str; 6] = [
    "Old Town",
    "Harbor",
    "North Hills",
    "Riverside",
    "Market Quarter",
    "Greenfield",
];

/// Complaint priority tier. Routing convention: Low goes to a mukhtar,
/// Medium to an admin, High to a manager. The UI lets any staff member edit
/// this freely, so it is a convention, not a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Importance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Unread,
    Pending,
    UnderReview,
    InProgress,
    Completed,
    Rejected,
    Closed,
}

/// Who a complaint is currently routed to. The backend keeps three separate
/// per-role id columns; we collapse them into one tagged value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub role: Role,
    pub user_id: String,
}

/// A citizen-reported issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    /// Server-assigned opaque id.
    pub id: String,
    /// Human-facing tag, unique, used for anonymous status lookup.
    pub tracking_number: String,
    pub district: String,
    /// Free-form classification, e.g. "infrastructure".
    pub category: String,
    pub importance: Importance,
    pub title: String,
    pub description: String,
    pub notes: String,
    /// Citizen-suggested remedy.
    pub citizen_help: String,
    pub location: String,
    pub phone_number: String,
    pub submitter_name: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub estimated_review_time: Option<String>,
    /// Set when the complaint is accepted.
    pub solution_info: Option<String>,
    /// Set when the complaint is refused.
    pub refusal_reason: Option<String>,
    pub assigned_to: Option<Assignment>,
    pub pinned: bool,
    /// Ephemeral "someone is actively handling this" marker.
    pub is_working_on: bool,
    pub working_on_by: Option<String>,
    /// Attachment URLs; insertion order is display order.
    pub attachments: Vec<String>,
}
