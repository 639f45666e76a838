//! Announcement and achievement boards. Plain CRUD: readable by everyone,
//! writable by Admin and Manager.

use chrono::{DateTime, Utc};
use log::info;
use reqwest::Method;
use serde_json::{json, Map, Value};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::content::{Achievement, Announcement};
use crate::models::user::Role;

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct NewAchievement {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub media_urls: Vec<String>,
}

/// Partial update; only set fields travel.
#[derive(Debug, Clone, Default)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub media_urls: Option<Vec<String>>,
}

impl UpdateContentRequest {
    fn to_body(&self) -> ApiResult<Value> {
        let mut body = Map::new();
        if let Some(title) = &self.title {
            body.insert("title".to_string(), json!(title));
        }
        if let Some(description) = &self.description {
            body.insert("description".to_string(), json!(description));
        }
        if let Some(date) = &self.date {
            body.insert("date".to_string(), json!(date));
        }
        if let Some(category) = &self.category {
            body.insert("category".to_string(), json!(category));
        }
        if let Some(media_urls) = &self.media_urls {
            body.insert("mediaUrls".to_string(), json!(media_urls));
        }
        if body.is_empty() {
            return Err(ApiError::Validation("no fields to update".to_string()));
        }
        Ok(Value::Object(body))
    }
}

impl ApiClient {
    pub async fn fetch_announcements(&self) -> ApiResult<Vec<Announcement>> {
        let resp = self.send_public(Method::GET, "announcements", None).await?;
        Ok(resp.json().await?)
    }

    pub async fn create_announcement(&self, new: &NewAnnouncement) -> ApiResult<Announcement> {
        let body = json!({
            "title": new.title,
            "description": new.description,
            "date": new.date,
            "category": new.category,
        });
        let resp = self.send_authorized(Method::POST, "announcements", Some(&body)).await?;
        Ok(resp.json().await?)
    }

    pub async fn update_announcement(
        &self,
        id: &str,
        req: &UpdateContentRequest,
    ) -> ApiResult<Announcement> {
        let body = req.to_body()?;
        let path = format!("announcements/{}", id);
        let resp = self.send_authorized(Method::PATCH, &path, Some(&body)).await?;
        Ok(resp.json().await?)
    }

    pub async fn delete_announcement(&self, id: &str) -> ApiResult<bool> {
        let path = format!("announcements/{}", id);
        self.send_authorized(Method::DELETE, &path, None).await?;
        Ok(true)
    }

    pub async fn fetch_achievements(&self) -> ApiResult<Vec<Achievement>> {
        let resp = self.send_public(Method::GET, "achievements", None).await?;
        Ok(resp.json().await?)
    }

    pub async fn create_achievement(&self, new: &NewAchievement) -> ApiResult<Achievement> {
        let body = json!({
            "title": new.title,
            "description": new.description,
            "date": new.date,
            "mediaUrls": new.media_urls,
        });
        let resp = self.send_authorized(Method::POST, "achievements", Some(&body)).await?;
        Ok(resp.json().await?)
    }

    pub async fn update_achievement(
        &self,
        id: &str,
        req: &UpdateContentRequest,
    ) -> ApiResult<Achievement> {
        let body = req.to_body()?;
        let path = format!("achievements/{}", id);
        let resp = self.send_authorized(Method::PATCH, &path, Some(&body)).await?;
        Ok(resp.json().await?)
    }

    pub async fn delete_achievement(&self, id: &str) -> ApiResult<bool> {
        let path = format!("achievements/{}", id);
        self.send_authorized(Method::DELETE, &path, None).await?;
        Ok(true)
    }
}

/// Write access to the boards, gated to Admin and Manager.
#[derive(Clone)]
pub struct BoardEditor {
    client: ApiClient,
}

impl BoardEditor {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn require_editor(&self) -> ApiResult<()> {
        match self.client.session().role() {
            Some(Role::Admin) | Some(Role::Manager) => Ok(()),
            _ => Err(ApiError::PermissionDenied(
                "the boards are editable by admins and managers only".to_string(),
            )),
        }
    }

    pub async fn publish_announcement(&self, new: &NewAnnouncement) -> ApiResult<Announcement> {
        self.require_editor()?;
        let announcement = self.client.create_announcement(new).await?;
        info!("announcement {} published", announcement.id);
        Ok(announcement)
    }

    pub async fn edit_announcement(
        &self,
        id: &str,
        req: &UpdateContentRequest,
    ) -> ApiResult<Announcement> {
        self.require_editor()?;
        self.client.update_announcement(id, req).await
    }

    pub async fn retract_announcement(&self, id: &str) -> ApiResult<bool> {
        self.require_editor()?;
        self.client.delete_announcement(id).await
    }

    pub async fn publish_achievement(&self, new: &NewAchievement) -> ApiResult<Achievement> {
        self.require_editor()?;
        let achievement = self.client.create_achievement(new).await?;
        info!("achievement {} published", achievement.id);
        Ok(achievement)
    }

    pub async fn edit_achievement(
        &self,
        id: &str,
        req: &UpdateContentRequest,
    ) -> ApiResult<Achievement> {
        self.require_editor()?;
        self.client.update_achievement(id, req).await
    }

    pub async fn retract_achievement(&self, id: &str) -> ApiResult<bool> {
        self.require_editor()?;
        self.client.delete_achievement(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::user::User;
    use crate::session::Session;

    #[tokio::test]
    async fn mukhtars_cannot_publish_to_the_boards() {
        let session = Session::new();
        session.set_token("tok");
        session.set_user(User {
            id: "m-1".to_string(),
            role: Role::Muktar,
            district: Some("Old Town".to_string()),
            email: "m@portal.example".to_string(),
            name: "Mukhtar".to_string(),
            joined_at: Utc::now(),
            active: true,
        });
        let editor =
            BoardEditor::new(ApiClient::new(&Config::with_base_url("http://127.0.0.1:9/v1"), session));

        let new = NewAnnouncement {
            title: "Road closure".to_string(),
            description: "Main street closed Saturday morning.".to_string(),
            date: Utc::now(),
            category: "traffic".to_string(),
        };
        assert!(matches!(
            editor.publish_announcement(&new).await,
            Err(ApiError::PermissionDenied(_))
        ));
    }

    #[test]
    fn content_update_uses_wire_names_and_rejects_empty() {
        let req = UpdateContentRequest {
            media_urls: Some(vec!["https://cdn.example/a.jpg".to_string()]),
            ..Default::default()
        };
        let body = req.to_body().unwrap();
        assert!(body.get("mediaUrls").is_some());

        assert!(matches!(
            UpdateContentRequest::default().to_body(),
            Err(ApiError::Validation(_))
        ));
    }
}
