//! Backend wire format and the exact mapping into domain types.
//!
//! The backend mixes naming conventions (`trackingTag` sits next to
//! `complaint_status`); the serde renames below mirror it field by field.
//! The status mapping is lossy on purpose: the backend only distinguishes
//! pending/accepted/refused, everything else collapses to `InProgress`.

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::complaint::{Assignment, Complaint, ComplaintStatus, Importance};
use crate::models::user::{Role, User};

/// A complaint record as the backend sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireComplaint {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "trackingTag", default)]
    pub tracking_tag: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub complaint_type: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "suggestedSolution", default)]
    pub suggested_solution: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "contactNumber", default)]
    pub contact_number: String,
    #[serde(rename = "submitterName", default)]
    pub submitter_name: String,
    #[serde(default = "default_status")]
    pub complaint_status: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "estimatedReviewTime", default)]
    pub estimated_review_time: Option<String>,
    #[serde(rename = "solutionInfo", default)]
    pub solution_info: Option<String>,
    #[serde(rename = "refusalReason", default)]
    pub refusal_reason: Option<String>,
    #[serde(rename = "assignedMuktarId", default)]
    pub assigned_muktar_id: Option<String>,
    #[serde(rename = "assignedAdminId", default)]
    pub assigned_admin_id: Option<String>,
    #[serde(rename = "assignedManagerId", default)]
    pub assigned_manager_id: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(rename = "isWorkingOn", default)]
    pub is_working_on: bool,
    #[serde(rename = "workingOnBy", default)]
    pub working_on_by: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

fn default_priority() -> String {
    "low".to_string()
}

fn default_status() -> String {
    "pending".to_string()
}

/// A user record as the backend sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(rename = "joinedAt", default)]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// `"high"/"mid"/"low"` to the importance tier. Anything else defaults to
/// Low, matching how unset importance is handled on submission.
pub fn importance_from_wire(raw: &str) -> Importance {
    match raw {
        "high" => Importance::High,
        "mid" => Importance::Medium,
        "low" => Importance::Low,
        other => {
            warn!("unmapped wire priority {:?}, defaulting to low", other);
            Importance::Low
        }
    }
}

pub fn importance_to_wire(importance: Importance) -> &'static str {
    match importance {
        Importance::High => "high",
        Importance::Medium => "mid",
        Importance::Low => "low",
    }
}

/// Backend status string to the richer frontend enum.
///
/// Only three backend values map explicitly; everything else lands in the
/// named fallback arm and becomes `InProgress`. This collapse is a known
/// boundary, kept for behavioral compatibility, so unmapped inputs are
/// logged rather than silently absorbed.
pub fn status_from_wire(raw: &str) -> ComplaintStatus {
    match raw {
        "pending" => ComplaintStatus::Pending,
        "accepted" => ComplaintStatus::Completed,
        "refused" => ComplaintStatus::Closed,
        other => {
            warn!("unmapped wire complaint_status {:?}, collapsing to in-progress", other);
            ComplaintStatus::InProgress
        }
    }
}

/// Domain status to the backend string. The three front-door states keep
/// their historical wire names; the richer states serialize under their own
/// names, which the inbound direction then collapses.
pub fn status_to_wire(status: ComplaintStatus) -> &'static str {
    match status {
        ComplaintStatus::Pending => "pending",
        ComplaintStatus::Completed => "accepted",
        ComplaintStatus::Closed => "refused",
        ComplaintStatus::Unread => "unread",
        ComplaintStatus::UnderReview => "under_review",
        ComplaintStatus::InProgress => "in_progress",
        ComplaintStatus::Rejected => "rejected",
    }
}

/// Collapse the three per-role assignee columns into one tagged assignment.
/// Highest authority wins when the backend populated more than one.
fn assignment_from_wire(wire: &WireComplaint) -> Option<Assignment> {
    let candidates = [
        (Role::Manager, wire.assigned_manager_id.as_ref()),
        (Role::Admin, wire.assigned_admin_id.as_ref()),
        (Role::Muktar, wire.assigned_muktar_id.as_ref()),
    ];
    let mut populated = candidates
        .into_iter()
        .filter_map(|(role, id)| id.filter(|id| !id.is_empty()).map(|id| (role, id.clone())));

    let first = populated.next()?;
    if populated.next().is_some() {
        warn!(
            "complaint {} carries multiple assignee ids, keeping the {} assignment",
            wire.id,
            first.0.as_wire()
        );
    }
    Some(Assignment { role: first.0, user_id: first.1 })
}

impl From<WireComplaint> for Complaint {
    fn from(wire: WireComplaint) -> Self {
        let assigned_to = assignment_from_wire(&wire);
        Complaint {
            importance: importance_from_wire(&wire.priority),
            status: status_from_wire(&wire.complaint_status),
            id: wire.id,
            tracking_number: wire.tracking_tag,
            district: wire.neighborhood,
            category: wire.complaint_type,
            title: wire.title,
            description: wire.description,
            notes: wire.notes,
            citizen_help: wire.suggested_solution,
            location: wire.location,
            phone_number: wire.contact_number,
            submitter_name: wire.submitter_name,
            created_at: wire.created_at.unwrap_or_else(Utc::now),
            updated_at: wire.updated_at.unwrap_or_else(Utc::now),
            estimated_review_time: wire.estimated_review_time,
            solution_info: wire.solution_info,
            refusal_reason: wire.refusal_reason,
            assigned_to,
            pinned: wire.pinned,
            is_working_on: wire.is_working_on,
            working_on_by: wire.working_on_by,
            attachments: wire.attachments,
        }
    }
}

impl From<&Complaint> for WireComplaint {
    fn from(complaint: &Complaint) -> Self {
        let (muktar, admin, manager) = match &complaint.assigned_to {
            Some(a) if a.role == Role::Muktar => (Some(a.user_id.clone()), None, None),
            Some(a) if a.role == Role::Admin => (None, Some(a.user_id.clone()), None),
            Some(a) if a.role == Role::Manager => (None, None, Some(a.user_id.clone())),
            _ => (None, None, None),
        };
        WireComplaint {
            id: complaint.id.clone(),
            tracking_tag: complaint.tracking_number.clone(),
            neighborhood: complaint.district.clone(),
            complaint_type: complaint.category.clone(),
            priority: importance_to_wire(complaint.importance).to_string(),
            title: complaint.title.clone(),
            description: complaint.description.clone(),
            notes: complaint.notes.clone(),
            suggested_solution: complaint.citizen_help.clone(),
            location: complaint.location.clone(),
            contact_number: complaint.phone_number.clone(),
            submitter_name: complaint.submitter_name.clone(),
            complaint_status: status_to_wire(complaint.status).to_string(),
            created_at: Some(complaint.created_at),
            updated_at: Some(complaint.updated_at),
            estimated_review_time: complaint.estimated_review_time.clone(),
            solution_info: complaint.solution_info.clone(),
            refusal_reason: complaint.refusal_reason.clone(),
            assigned_muktar_id: muktar,
            assigned_admin_id: admin,
            assigned_manager_id: manager,
            pinned: complaint.pinned,
            is_working_on: complaint.is_working_on,
            working_on_by: complaint.working_on_by.clone(),
            attachments: complaint.attachments.clone(),
        }
    }
}

impl From<WireUser> for User {
    fn from(wire: WireUser) -> Self {
        User {
            role: Role::parse(&wire.role),
            id: wire.id,
            district: wire.neighborhood.filter(|d| !d.is_empty()),
            email: wire.email,
            name: wire.name,
            joined_at: wire.joined_at.unwrap_or_else(Utc::now),
            active: wire.is_active,
        }
    }
}
