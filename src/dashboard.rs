//! Dashboard aggregation: the counts behind the charts and the urgent-queue
//! table. Chart numbers and the queue use *different* visibility filters for
//! an admin (Medium+Low vs Medium-only), so both are computed from the same
//! snapshot here rather than in the widgets.

use std::collections::HashMap;

use crate::lifecycle;
use crate::models::complaint::{Complaint, ComplaintStatus, Importance};
use crate::models::user::Role;
use crate::visibility::{chart_visibility_filter, queue_visibility_filter};

#[derive(Debug, Clone)]
pub struct DashboardData {
    /// Complaints visible to the role's charts.
    pub total: usize,
    pub status_counts: HashMap<ComplaintStatus, usize>,
    pub importance_counts: HashMap<Importance, usize>,
    pub district_counts: HashMap<String, usize>,
    /// Headline split: records still in flight vs settled (accepted or
    /// refused), over the chart view.
    pub open: usize,
    pub resolved: usize,
    /// Queue-filtered list, pinned entries first, then newest first.
    pub urgent_queue: Vec<Complaint>,
}

pub fn compute_dashboard(role: Role, complaints: &[Complaint]) -> DashboardData {
    let chart_view = chart_visibility_filter(role, complaints);

    let mut status_counts: HashMap<ComplaintStatus, usize> = HashMap::new();
    let mut importance_counts: HashMap<Importance, usize> = HashMap::new();
    let mut district_counts: HashMap<String, usize> = HashMap::new();
    let mut resolved = 0;
    for complaint in &chart_view {
        *status_counts.entry(complaint.status).or_insert(0) += 1;
        *importance_counts.entry(complaint.importance).or_insert(0) += 1;
        *district_counts.entry(complaint.district.clone()).or_insert(0) += 1;
        if lifecycle::is_terminal(complaint.status) {
            resolved += 1;
        }
    }

    let mut urgent_queue = queue_visibility_filter(role, complaints);
    urgent_queue.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then(b.created_at.cmp(&a.created_at))
    });

    DashboardData {
        total: chart_view.len(),
        status_counts,
        importance_counts,
        district_counts,
        open: chart_view.len() - resolved,
        resolved,
        urgent_queue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_data::demo_complaints;

    #[test]
    fn counts_add_up_for_a_manager() {
        let all = demo_complaints();
        let data = compute_dashboard(Role::Manager, &all);
        assert_eq!(data.total, all.len());
        assert_eq!(data.status_counts.values().sum::<usize>(), all.len());
        assert_eq!(data.importance_counts.values().sum::<usize>(), all.len());
        assert_eq!(data.district_counts.values().sum::<usize>(), all.len());
    }

    /// The admin dashboard shows Medium+Low in its charts next to a
    /// Medium-only queue table. Both views from one snapshot.
    #[test]
    fn admin_charts_and_queue_use_different_filters() {
        let all = demo_complaints();
        let data = compute_dashboard(Role::Admin, &all);

        assert!(data.importance_counts.get(&Importance::Low).copied().unwrap_or(0) > 0);
        assert_eq!(data.importance_counts.get(&Importance::High), None);
        assert!(data
            .urgent_queue
            .iter()
            .all(|c| c.importance == Importance::Medium));
        assert!(data.urgent_queue.len() < data.total);
    }

    #[test]
    fn open_and_resolved_split_the_chart_view() {
        let all = demo_complaints();
        let data = compute_dashboard(Role::Manager, &all);

        let settled = data.status_counts.get(&ComplaintStatus::Completed).copied().unwrap_or(0)
            + data.status_counts.get(&ComplaintStatus::Closed).copied().unwrap_or(0);
        assert!(settled > 0);
        assert_eq!(data.resolved, settled);
        assert_eq!(data.open + data.resolved, data.total);
    }

    #[test]
    fn queue_orders_pinned_first_then_newest() {
        let all = demo_complaints();
        let data = compute_dashboard(Role::Manager, &all);

        let first_unpinned = data.urgent_queue.iter().position(|c| !c.pinned);
        if let Some(split) = first_unpinned {
            assert!(data.urgent_queue[..split].iter().all(|c| c.pinned));
            assert!(data.urgent_queue[split..].iter().all(|c| !c.pinned));
            for pair in data.urgent_queue[split..].windows(2) {
                assert!(pair[0].created_at >= pair[1].created_at);
            }
        }
    }

    #[test]
    fn mukhtar_dashboard_only_counts_low() {
        let all = demo_complaints();
        let data = compute_dashboard(Role::Muktar, &all);
        assert_eq!(
            data.importance_counts.keys().collect::<Vec<_>>(),
            vec![&Importance::Low]
        );
    }
}
