//! Role visibility rules: which slice of the full complaint list each role
//! gets to see. Recomputed on every read; nothing here is cached.
//!
//! The Admin dashboard applies two *different* importance filters depending
//! on which widget is asking (Medium-only for its urgent queue table,
//! Medium+Low for its charts). That split exists in the product and is kept
//! as two separately named filters rather than unified.

use crate::models::complaint::{Complaint, Importance};
use crate::models::user::Role;

/// The base role filter.
///
/// Mukhtar sees Low only, Admin sees Medium and Low, Manager sees the whole
/// list. Citizens are not filtered by this rule; they only ever fetch their
/// own submissions through a separate endpoint.
pub fn visible_for(role: Role, complaints: &[Complaint]) -> Vec<Complaint> {
    match role {
        Role::Muktar => complaints
            .iter()
            .filter(|c| c.importance == Importance::Low)
            .cloned()
            .collect(),
        Role::Admin => complaints
            .iter()
            .filter(|c| matches!(c.importance, Importance::Medium | Importance::Low))
            .cloned()
            .collect(),
        Role::Manager | Role::Citizen => complaints.to_vec(),
    }
}

/// Filter feeding the dashboard charts. Same rule as [`visible_for`]: an
/// admin's charts count Medium and Low complaints.
pub fn chart_visibility_filter(role: Role, complaints: &[Complaint]) -> Vec<Complaint> {
    visible_for(role, complaints)
}

/// Filter feeding the urgent-queue table. For an admin this narrows further
/// to Medium only, diverging from the chart filter beside it.
pub fn queue_visibility_filter(role: Role, complaints: &[Complaint]) -> Vec<Complaint> {
    match role {
        Role::Admin => complaints
            .iter()
            .filter(|c| c.importance == Importance::Medium)
            .cloned()
            .collect(),
        _ => visible_for(role, complaints),
    }
}
