//! User management endpoints plus the role-gated service wrapper.

use log::info;
use reqwest::Method;
use serde_json::{json, Map, Value};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::complaint::Complaint;
use crate::models::user::{Role, User};
use crate::wire::{WireComplaint, WireUser};

/// Partial update payload; only the set fields travel.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub district: Option<String>,
    pub role: Option<Role>,
}

impl UpdateUserRequest {
    fn to_body(&self) -> ApiResult<Value> {
        let mut body = Map::new();
        if let Some(name) = &self.name {
            body.insert("name".to_string(), json!(name));
        }
        if let Some(email) = &self.email {
            body.insert("email".to_string(), json!(email));
        }
        if let Some(district) = &self.district {
            body.insert("neighborhood".to_string(), json!(district));
        }
        if let Some(role) = &self.role {
            body.insert("role".to_string(), json!(role.as_wire()));
        }
        if body.is_empty() {
            return Err(ApiError::Validation("no fields to update".to_string()));
        }
        Ok(Value::Object(body))
    }
}

impl ApiClient {
    pub async fn fetch_users(&self) -> ApiResult<Vec<User>> {
        let resp = self.send_authorized(Method::GET, "users", None).await?;
        let records: Vec<WireUser> = resp.json().await?;
        Ok(records.into_iter().map(User::from).collect())
    }

    pub async fn fetch_user(&self, id: &str) -> ApiResult<User> {
        let path = format!("users/{}", id);
        let resp = self.send_authorized(Method::GET, &path, None).await?;
        let record: WireUser = resp.json().await?;
        Ok(User::from(record))
    }

    pub async fn update_user(&self, id: &str, req: &UpdateUserRequest) -> ApiResult<User> {
        let body = req.to_body()?;
        let path = format!("users/{}", id);
        let resp = self.send_authorized(Method::PATCH, &path, Some(&body)).await?;
        let record: WireUser = resp.json().await?;
        Ok(User::from(record))
    }

    /// Soft deactivation; the account stays on record.
    pub async fn deactivate_user(&self, id: &str) -> ApiResult<bool> {
        let path = format!("users/{}/deactivate", id);
        self.send_authorized(Method::PATCH, &path, None).await?;
        Ok(true)
    }

    /// Hard delete. Gating to managers happens in [`UserAdmin`].
    pub async fn delete_user(&self, id: &str) -> ApiResult<bool> {
        let path = format!("users/{}", id);
        self.send_authorized(Method::DELETE, &path, None).await?;
        Ok(true)
    }

    /// A citizen's own submissions; this is the list the role visibility
    /// filter never touches.
    pub async fn fetch_user_complaints(&self, user_id: &str) -> ApiResult<Vec<Complaint>> {
        let path = format!("users/{}/complaints", user_id);
        let resp = self.send_authorized(Method::GET, &path, None).await?;
        let records: Vec<WireComplaint> = resp.json().await?;
        Ok(records.into_iter().map(Complaint::from).collect())
    }
}

/// Role-gated user administration for the staff screens.
#[derive(Clone)]
pub struct UserAdmin {
    client: ApiClient,
}

impl UserAdmin {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn acting(&self) -> (Option<String>, Role) {
        let user = self.client.session().current_user();
        let role = user.as_ref().map(|u| u.role).unwrap_or(Role::Citizen);
        (user.map(|u| u.id), role)
    }

    /// Staff directory; citizens have no business listing accounts.
    pub async fn list(&self) -> ApiResult<Vec<User>> {
        let (_, role) = self.acting();
        if !role.is_staff() {
            return Err(ApiError::PermissionDenied(
                "the user directory is staff-only".to_string(),
            ));
        }
        self.client.fetch_users().await
    }

    /// Self-service edit, or a manager editing anyone.
    pub async fn update(&self, id: &str, req: &UpdateUserRequest) -> ApiResult<User> {
        let (acting_id, role) = self.acting();
        let is_self = acting_id.as_deref() == Some(id);
        if !is_self && role != Role::Manager {
            return Err(ApiError::PermissionDenied(
                "only managers may edit other accounts".to_string(),
            ));
        }
        let user = self.client.update_user(id, req).await?;
        info!("user {} updated", id);
        Ok(user)
    }

    /// Soft deactivation, Admin and Manager only.
    pub async fn deactivate(&self, id: &str) -> ApiResult<bool> {
        let (_, role) = self.acting();
        if role < Role::Admin {
            return Err(ApiError::PermissionDenied(
                "deactivating accounts requires admin or manager".to_string(),
            ));
        }
        self.client.deactivate_user(id).await
    }

    /// Hard delete, Manager only.
    pub async fn remove(&self, id: &str) -> ApiResult<bool> {
        let (_, role) = self.acting();
        if role != Role::Manager {
            return Err(ApiError::PermissionDenied(
                "only managers may permanently delete accounts".to_string(),
            ));
        }
        self.client.delete_user(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::Session;
    use chrono::Utc;

    // Points at a dead address; the gates reject before any request is made.
    fn admin_service(role: Role) -> UserAdmin {
        let session = Session::new();
        session.set_token("tok");
        session.set_user(User {
            id: "acting-1".to_string(),
            role,
            district: None,
            email: "acting@portal.example".to_string(),
            name: "Acting".to_string(),
            joined_at: Utc::now(),
            active: true,
        });
        UserAdmin::new(ApiClient::new(&Config::with_base_url("http://127.0.0.1:9/v1"), session))
    }

    #[tokio::test]
    async fn citizens_cannot_list_the_directory() {
        let service = admin_service(Role::Citizen);
        assert!(matches!(service.list().await, Err(ApiError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn only_managers_hard_delete_accounts() {
        let service = admin_service(Role::Admin);
        assert!(matches!(service.remove("u-2").await, Err(ApiError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn mukhtars_cannot_deactivate_accounts() {
        let service = admin_service(Role::Muktar);
        assert!(matches!(
            service.deactivate("u-2").await,
            Err(ApiError::PermissionDenied(_))
        ));
    }

    #[tokio::test]
    async fn non_managers_cannot_edit_other_accounts() {
        let service = admin_service(Role::Admin);
        let req = UpdateUserRequest { name: Some("New Name".to_string()), ..Default::default() };
        assert!(matches!(
            service.update("someone-else", &req).await,
            Err(ApiError::PermissionDenied(_))
        ));
    }

    #[test]
    fn empty_update_payload_is_rejected() {
        let err = UpdateUserRequest::default().to_body().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn update_payload_uses_wire_field_names() {
        let req = UpdateUserRequest {
            district: Some("Old Town".to_string()),
            role: Some(Role::Admin),
            ..Default::default()
        };
        let body = req.to_body().unwrap();
        assert_eq!(body["neighborhood"], "Old Town");
        assert_eq!(body["role"], "admin");
        assert!(body.get("name").is_none());
    }
}
