//! The complaint state model.
//!
//! Two doors into a terminal state: the recommended accept/refuse pair,
//! guarded and payload-carrying, and the staff table's free-form status
//! dropdown, which moves anything anywhere with no guard. Both are kept.

use chrono::Utc;

use crate::models::complaint::{Complaint, ComplaintStatus};

/// States the accept/refuse front door may move a complaint out of.
pub fn can_resolve(status: ComplaintStatus) -> bool {
    matches!(status, ComplaintStatus::Pending | ComplaintStatus::InProgress)
}

pub fn is_terminal(status: ComplaintStatus) -> bool {
    matches!(status, ComplaintStatus::Completed | ComplaintStatus::Closed)
}

/// Accept: stores the operator-supplied solution and completes the
/// complaint. Callers validate the text and the source state first.
pub fn apply_accept(complaint: &mut Complaint, solution_info: &str) {
    complaint.status = ComplaintStatus::Completed;
    complaint.solution_info = Some(solution_info.to_string());
    complaint.updated_at = Utc::now();
}

/// Refuse: stores the refusal reason and closes the complaint.
pub fn apply_refuse(complaint: &mut Complaint, refusal_reason: &str) {
    complaint.status = ComplaintStatus::Closed;
    complaint.refusal_reason = Some(refusal_reason.to_string());
    complaint.updated_at = Utc::now();
}

/// The escape hatch: any status to any other status, no payload required.
/// A Pending complaint can land in Closed with no refusal reason on record.
pub fn apply_override(complaint: &mut Complaint, status: ComplaintStatus) {
    complaint.status = status;
    complaint.updated_at = Utc::now();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_data;

    fn pending_complaint() -> Complaint {
        demo_data::demo_complaints()
            .into_iter()
            .find(|c| c.status == ComplaintStatus::Pending)
            .expect("demo data always contains a pending complaint")
    }

    #[test]
    fn accept_is_open_from_pending_and_in_progress_only() {
        assert!(can_resolve(ComplaintStatus::Pending));
        assert!(can_resolve(ComplaintStatus::InProgress));
        assert!(!can_resolve(ComplaintStatus::Completed));
        assert!(!can_resolve(ComplaintStatus::Closed));
        assert!(!can_resolve(ComplaintStatus::UnderReview));
        assert!(!can_resolve(ComplaintStatus::Unread));
        assert!(!can_resolve(ComplaintStatus::Rejected));
    }

    #[test]
    fn accept_stores_solution_and_completes() {
        let mut complaint = pending_complaint();
        apply_accept(&mut complaint, "Crew dispatched, pothole filled.");
        assert_eq!(complaint.status, ComplaintStatus::Completed);
        assert_eq!(complaint.solution_info.as_deref(), Some("Crew dispatched, pothole filled."));
        assert!(is_terminal(complaint.status));
    }

    #[test]
    fn refuse_stores_reason_and_closes() {
        let mut complaint = pending_complaint();
        apply_refuse(&mut complaint, "Private property, outside municipal remit.");
        assert_eq!(complaint.status, ComplaintStatus::Closed);
        assert_eq!(
            complaint.refusal_reason.as_deref(),
            Some("Private property, outside municipal remit.")
        );
    }

    /// Documents the escape hatch: a manager can drag a Pending complaint
    /// straight to Closed through the dropdown, leaving no refusal reason.
    #[test]
    fn override_bypasses_the_front_door_entirely() {
        let mut complaint = pending_complaint();
        apply_override(&mut complaint, ComplaintStatus::Closed);
        assert_eq!(complaint.status, ComplaintStatus::Closed);
        assert!(complaint.refusal_reason.is_none());

        // And it happily reopens a terminal state, too.
        apply_override(&mut complaint, ComplaintStatus::UnderReview);
        assert_eq!(complaint.status, ComplaintStatus::UnderReview);
    }
}
