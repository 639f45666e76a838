//! Complaint endpoints and the in-memory complaints store.
//!
//! The store is the staff dashboard's data context: it caches the last
//! fetched list, reapplies the role filter on every read, patches its own
//! copy after successful mutations instead of re-fetching, and owns the
//! demo-data substitution when a fetch fails or comes back empty.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::{error, info, warn};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use crate::client::ApiClient;
use crate::config::Config;
use crate::demo_data;
use crate::error::{ApiError, ApiResult};
use crate::lifecycle;
use crate::models::complaint::{Complaint, ComplaintStatus, Importance};
use crate::models::user::Role;
use crate::validation;
use crate::visibility;
use crate::wire::{self, WireComplaint};

/// Fields the public submission form collects.
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub district: String,
    pub category: String,
    /// Defaults to Low when the citizen leaves it unset.
    pub importance: Option<Importance>,
    pub citizen_help: String,
    pub location: String,
    pub phone_number: String,
    pub submitter_name: String,
}

/// A file handed over by the submission form. Upload plumbing lives with an
/// external collaborator; only the file names travel with the record.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Validate in the form layer, then hand the complaint to the adapter.
/// Returns the server-assigned tracking tag.
pub async fn submit_complaint_form(
    client: &ApiClient,
    complaint: &NewComplaint,
    attachments: &[AttachmentUpload],
) -> ApiResult<String> {
    validation::validate_submission(complaint)?;
    client.submit_complaint(complaint, attachments).await
}

impl ApiClient {
    /// POST the citizen-supplied fields, no auth. Input is assumed to be
    /// pre-validated by the form layer and is forwarded as-is.
    pub async fn submit_complaint(
        &self,
        complaint: &NewComplaint,
        attachments: &[AttachmentUpload],
    ) -> ApiResult<String> {
        let names: Vec<&str> = attachments.iter().map(|a| a.file_name.as_str()).collect();
        let body = json!({
            "title": complaint.title,
            "description": complaint.description,
            "neighborhood": complaint.district,
            "complaint_type": complaint.category,
            "priority": wire::importance_to_wire(complaint.importance.unwrap_or(Importance::Low)),
            "suggestedSolution": complaint.citizen_help,
            "location": complaint.location,
            "contactNumber": complaint.phone_number,
            "submitterName": complaint.submitter_name,
            "attachments": names,
        });
        let resp = self.send_public(Method::POST, "complaints", Some(&body)).await?;

        #[derive(Deserialize)]
        struct SubmitResponse {
            #[serde(rename = "trackingTag")]
            tracking_tag: String,
        }
        let payload: SubmitResponse = resp.json().await?;
        info!("complaint submitted, tracking tag {}", payload.tracking_tag);
        Ok(payload.tracking_tag)
    }

    /// Fetch the full authorized list. No fallback here: the store decides
    /// what to do with an error or an empty result.
    pub async fn fetch_complaints(&self) -> ApiResult<Vec<Complaint>> {
        let resp = self.send_authorized(Method::GET, "complaints", None).await?;
        let records: Vec<WireComplaint> = resp.json().await?;
        Ok(records.into_iter().map(Complaint::from).collect())
    }

    pub async fn fetch_complaint(&self, id: &str) -> ApiResult<Complaint> {
        let path = format!("complaints/{}", id);
        let resp = self.send_authorized(Method::GET, &path, None).await?;
        let record: WireComplaint = resp.json().await?;
        Ok(Complaint::from(record))
    }

    /// Anonymous status lookup by tracking tag. Public, no auth.
    pub async fn track_complaint(&self, tag: &str) -> ApiResult<Complaint> {
        let path = format!("complaints/track/{}", tag);
        let resp = self.send_public(Method::GET, &path, None).await?;
        let record: WireComplaint = resp.json().await?;
        Ok(Complaint::from(record))
    }

    /// Accept: PATCH-style, last write wins, returns the updated record.
    pub async fn accept_complaint(&self, id: &str, solution_info: &str) -> ApiResult<Complaint> {
        let path = format!("complaints/{}/accept", id);
        let body = json!({ "solutionInfo": solution_info });
        let resp = self.send_authorized(Method::PATCH, &path, Some(&body)).await?;
        let record: WireComplaint = resp.json().await?;
        Ok(Complaint::from(record))
    }

    pub async fn refuse_complaint(&self, id: &str, refusal_reason: &str) -> ApiResult<Complaint> {
        let path = format!("complaints/{}/refuse", id);
        let body = json!({ "refusalReason": refusal_reason });
        let resp = self.send_authorized(Method::PATCH, &path, Some(&body)).await?;
        let record: WireComplaint = resp.json().await?;
        Ok(Complaint::from(record))
    }

    /// Thin field mutators. Each returns a success flag; the caller patches
    /// its own copy, there is no re-fetch round trip.
    pub async fn update_importance(&self, id: &str, importance: Importance) -> ApiResult<bool> {
        let body = json!({ "priority": wire::importance_to_wire(importance) });
        self.patch_complaint(id, &body).await
    }

    pub async fn update_pinned(&self, id: &str, pinned: bool) -> ApiResult<bool> {
        let body = json!({ "pinned": pinned });
        self.patch_complaint(id, &body).await
    }

    pub async fn update_notes(&self, id: &str, notes: &str) -> ApiResult<bool> {
        let body = json!({ "notes": notes });
        self.patch_complaint(id, &body).await
    }

    pub async fn toggle_working_on(
        &self,
        id: &str,
        working: bool,
        by: Option<&str>,
    ) -> ApiResult<bool> {
        let body = json!({ "isWorkingOn": working, "workingOnBy": by });
        self.patch_complaint(id, &body).await
    }

    /// The free-form status override (staff table dropdown). No guard.
    pub async fn update_status(&self, id: &str, status: ComplaintStatus) -> ApiResult<bool> {
        let body = json!({ "complaint_status": wire::status_to_wire(status) });
        self.patch_complaint(id, &body).await
    }

    /// Soft or hard delete is the backend's business; we only pass the flag.
    pub async fn delete_complaint(&self, id: &str, hard: bool) -> ApiResult<bool> {
        let path = format!("complaints/{}?hard={}", id, hard);
        self.send_authorized(Method::DELETE, &path, None).await?;
        Ok(true)
    }

    async fn patch_complaint(&self, id: &str, body: &Value) -> ApiResult<bool> {
        let path = format!("complaints/{}", id);
        self.send_authorized(Method::PATCH, &path, Some(body)).await?;
        Ok(true)
    }
}

/// Shared, clonable complaint cache for one signed-in staff member.
#[derive(Clone)]
pub struct ComplaintsStore {
    client: ApiClient,
    config: Config,
    complaints: Arc<RwLock<Vec<Complaint>>>,
}

impl ComplaintsStore {
    pub fn new(client: ApiClient, config: Config) -> Self {
        Self {
            client,
            config,
            complaints: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn acting_role(&self) -> Role {
        self.client.session().role().unwrap_or(Role::Citizen)
    }

    /// Reload from the backend. A failed fetch *or* an empty result swaps in
    /// the demo dataset (when enabled), so a legitimately empty backend is
    /// indistinguishable from an outage here. That trade is deliberate and
    /// the substitution is logged where it happens. Returns the list length.
    pub async fn refresh(&self) -> ApiResult<usize> {
        let fetched = match self.client.fetch_complaints().await {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => {
                if !self.config.demo_fallback {
                    self.complaints.write().unwrap().clear();
                    return Ok(0);
                }
                warn!("backend returned an empty complaint list, substituting demo data");
                demo_data::demo_complaints()
            }
            Err(e) => {
                if !self.config.demo_fallback {
                    return Err(e);
                }
                warn!("fetching complaints failed ({}), substituting demo data", e);
                demo_data::demo_complaints()
            }
        };
        let len = fetched.len();
        *self.complaints.write().unwrap() = fetched;
        Ok(len)
    }

    /// Snapshot of the unfiltered list.
    pub fn all(&self) -> Vec<Complaint> {
        self.complaints.read().unwrap().clone()
    }

    /// The acting role's view. Recomputed on every call; the filtered result
    /// is never cached across mutations.
    pub fn visible(&self) -> Vec<Complaint> {
        visibility::visible_for(self.acting_role(), &self.complaints.read().unwrap())
    }

    pub fn get(&self, id: &str) -> Option<Complaint> {
        self.complaints.read().unwrap().iter().find(|c| c.id == id).cloned()
    }

    /// Accept through the front door: non-empty solution text and a legal
    /// source state, both checked before any network call.
    pub async fn accept(&self, id: &str, solution_info: &str) -> ApiResult<Complaint> {
        validation::validate_resolution_text("solution", solution_info)?;
        let current = self.get(id).ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        if !lifecycle::can_resolve(current.status) {
            return Err(ApiError::Validation(format!(
                "complaint in status {:?} cannot be accepted",
                current.status
            )));
        }

        let updated = self.client.accept_complaint(id, solution_info).await?;
        self.patch(id, |c| lifecycle::apply_accept(c, solution_info));
        info!("complaint {} accepted", id);
        Ok(updated)
    }

    pub async fn refuse(&self, id: &str, refusal_reason: &str) -> ApiResult<Complaint> {
        validation::validate_resolution_text("refusal reason", refusal_reason)?;
        let current = self.get(id).ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        if !lifecycle::can_resolve(current.status) {
            return Err(ApiError::Validation(format!(
                "complaint in status {:?} cannot be refused",
                current.status
            )));
        }

        let updated = self.client.refuse_complaint(id, refusal_reason).await?;
        self.patch(id, |c| lifecycle::apply_refuse(c, refusal_reason));
        info!("complaint {} refused", id);
        Ok(updated)
    }

    pub async fn set_importance(&self, id: &str, importance: Importance) -> ApiResult<bool> {
        let ok = self.client.update_importance(id, importance).await?;
        if ok {
            self.patch(id, |c| c.importance = importance);
        }
        Ok(ok)
    }

    pub async fn set_pinned(&self, id: &str, pinned: bool) -> ApiResult<bool> {
        let ok = self.client.update_pinned(id, pinned).await?;
        if ok {
            self.patch(id, |c| c.pinned = pinned);
        }
        Ok(ok)
    }

    /// Staff-facing free-form notes on a record.
    pub async fn set_notes(&self, id: &str, notes: &str) -> ApiResult<bool> {
        let ok = self.client.update_notes(id, notes).await?;
        if ok {
            self.patch(id, |c| c.notes = notes.to_string());
        }
        Ok(ok)
    }

    /// Flip the "someone is on this" marker for the signed-in user.
    pub async fn toggle_working_on(&self, id: &str) -> ApiResult<bool> {
        let current = self.get(id).ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        let working = !current.is_working_on;
        let by = self.client.session().current_user().map(|u| u.id);

        let ok = self
            .client
            .toggle_working_on(id, working, by.as_deref().filter(|_| working))
            .await?;
        if ok {
            self.patch(id, |c| {
                c.is_working_on = working;
                c.working_on_by = if working { by.clone() } else { None };
            });
        }
        Ok(ok)
    }

    /// The unguarded escape hatch, mirrored locally.
    pub async fn override_status(&self, id: &str, status: ComplaintStatus) -> ApiResult<bool> {
        let ok = self.client.update_status(id, status).await?;
        if ok {
            self.patch(id, |c| lifecycle::apply_override(c, status));
        }
        Ok(ok)
    }

    /// Delete; managers delete for real, everyone else soft-deletes.
    pub async fn remove(&self, id: &str) -> ApiResult<bool> {
        let hard = self.acting_role() == Role::Manager;
        let ok = self.client.delete_complaint(id, hard).await?;
        if ok {
            self.complaints.write().unwrap().retain(|c| c.id != id);
        }
        Ok(ok)
    }

    /// Polling auto-refresh; re-invokes the same read path on an interval.
    /// No de-duplication of in-flight requests and no cancellation beyond
    /// dropping the returned handle.
    pub fn spawn_auto_refresh(&self) -> JoinHandle<()> {
        let store = self.clone();
        let period = Duration::from_secs(store.config.refresh_interval_secs.max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick fires immediately; skip it, refresh() was
            // already called on login.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = store.refresh().await {
                    error!("auto refresh failed: {}", e);
                }
            }
        })
    }

    fn patch<F: FnOnce(&mut Complaint)>(&self, id: &str, mutate: F) -> bool {
        let mut list = self.complaints.write().unwrap();
        match list.iter_mut().find(|c| c.id == id) {
            Some(complaint) => {
                mutate(complaint);
                true
            }
            None => false,
        }
    }
}
