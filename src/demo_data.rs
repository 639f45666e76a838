//! Static demo dataset.
//!
//! Substituted for the live complaint list when the backend is unreachable
//! or returns an empty list, so dashboards stay populated during
//! development. The set deliberately spans every importance tier, several
//! districts and both terminal states, because the visibility and dashboard
//! tests lean on that coverage.

use chrono::{Duration, Utc};

use crate::models::complaint::{Assignment, Complaint, ComplaintStatus, Importance};
use crate::models::user::Role;

#[allow(clippy::too_many_arguments)]
fn demo(
    n: u32,
    district: &str,
    category: &str,
    importance: Importance,
    status: ComplaintStatus,
    title: &str,
    description: &str,
    days_ago: i64,
) -> Complaint {
    let created_at = Utc::now() - Duration::days(days_ago);
    Complaint {
        id: format!("demo-{}", n),
        tracking_number: format!("TRK-DEMO-{:04}", n),
        district: district.to_string(),
        category: category.to_string(),
        importance,
        title: title.to_string(),
        description: description.to_string(),
        notes: String::new(),
        citizen_help: String::new(),
        location: format!("{} district office area", district),
        phone_number: "+96170000000".to_string(),
        submitter_name: "Demo Citizen".to_string(),
        status,
        created_at,
        updated_at: created_at,
        estimated_review_time: Some("3 days".to_string()),
        solution_info: None,
        refusal_reason: None,
        assigned_to: None,
        pinned: false,
        is_working_on: false,
        working_on_by: None,
        attachments: Vec::new(),
    }
}

/// The dataset shown when the backend gives us nothing.
pub fn demo_complaints() -> Vec<Complaint> {
    let mut list = vec![
        demo(
            1,
            "Old Town",
            "infrastructure",
            Importance::Low,
            ComplaintStatus::Pending,
            "Cracked pavement on Clock Tower Sq",
            "Loose paving stones in front of the fountain, people keep tripping.",
            2,
        ),
        demo(
            2,
            "Harbor",
            "lighting",
            Importance::Low,
            ComplaintStatus::InProgress,
            "Streetlight out at pier entrance",
            "The lamp at the pier gate has been dark for over a week now.",
            5,
        ),
        demo(
            3,
            "Riverside",
            "sanitation",
            Importance::Medium,
            ComplaintStatus::Pending,
            "Overflowing bins on the promenade",
            "Bins along the river walk have not been emptied since the festival.",
            1,
        ),
        demo(
            4,
            "Market Quarter",
            "traffic",
            Importance::Medium,
            ComplaintStatus::UnderReview,
            "Delivery trucks blocking the lane",
            "Morning deliveries block the single access lane for over an hour.",
            3,
        ),
        demo(
            5,
            "North Hills",
            "water supply",
            Importance::High,
            ComplaintStatus::Pending,
            "Burst water main on Cedar Road",
            "Water has been running down Cedar Road since last night, pressure dropped.",
            0,
        ),
        demo(
            6,
            "Greenfield",
            "parks",
            Importance::Low,
            ComplaintStatus::Completed,
            "Broken swing in the playground",
            "One of the swings in Greenfield park has a snapped chain.",
            14,
        ),
        demo(
            7,
            "Harbor",
            "noise",
            Importance::Medium,
            ComplaintStatus::Closed,
            "Night construction near the docks",
            "Pile driving continues past midnight next to the residential block.",
            20,
        ),
        demo(
            8,
            "Old Town",
            "infrastructure",
            Importance::High,
            ComplaintStatus::InProgress,
            "Partial wall collapse in the old bazaar",
            "A section of retaining wall came down, the alley is impassable.",
            1,
        ),
    ];

    // Texture the dataset the way a live list looks: a pinned urgent item,
    // a complaint someone is actively on, resolved payloads and assignments.
    list[4].pinned = true;
    list[4].assigned_to = Some(Assignment {
        role: Role::Manager,
        user_id: "demo-manager-1".to_string(),
    });
    list[7].is_working_on = true;
    list[7].working_on_by = Some("demo-admin-1".to_string());
    list[5].solution_info = Some("Swing chain replaced by the parks crew.".to_string());
    list[5].assigned_to = Some(Assignment {
        role: Role::Muktar,
        user_id: "demo-mukhtar-1".to_string(),
    });
    list[6].refusal_reason =
        Some("Permitted works, noise exemption runs until end of month.".to_string());
    list[2].attachments = vec![
        "https://cdn.example.org/demo/bins-1.jpg".to_string(),
        "https://cdn.example.org/demo/bins-2.jpg".to_string(),
    ];

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::complaint::DISTRICTS;

    #[test]
    fn demo_dataset_is_never_empty() {
        assert!(!demo_complaints().is_empty());
    }

    #[test]
    fn demo_dataset_covers_every_importance_tier() {
        let list = demo_complaints();
        for tier in [Importance::High, Importance::Medium, Importance::Low] {
            assert!(list.iter().any(|c| c.importance == tier), "missing {:?}", tier);
        }
    }

    #[test]
    fn demo_dataset_uses_known_districts_and_unique_ids() {
        let list = demo_complaints();
        for complaint in &list {
            assert!(DISTRICTS.contains(&complaint.district.as_str()));
        }
        let mut ids: Vec<&str> = list.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), list.len());
    }

    #[test]
    fn resolved_demo_entries_carry_their_payloads() {
        let list = demo_complaints();
        let completed = list
            .iter()
            .find(|c| c.status == ComplaintStatus::Completed)
            .expect("a completed demo complaint");
        assert!(completed.solution_info.is_some());

        let closed = list
            .iter()
            .find(|c| c.status == ComplaintStatus::Closed)
            .expect("a closed demo complaint");
        assert!(closed.refusal_reason.is_some());
    }
}
