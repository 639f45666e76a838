//! HTTP client for the complaint backend.
//!
//! One seam between the wire format and the domain types. Every authorized
//! call attaches the bearer token from the session; a 401 triggers exactly
//! one silent refresh (cookie-based) followed by one retry. Callers never
//! see a raw 401 when the refresh succeeds, and get
//! [`ApiError::AuthenticationFailed`] with a cleared session when it fails.

use log::{info, warn};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::user::User;
use crate::session::Session;
use crate::wire::WireUser;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(default)]
    user: Option<WireUser>,
}

impl ApiClient {
    /// The session is handed in explicitly; there is no ambient token state.
    /// The cookie store carries the httpOnly refresh cookie between calls.
    pub fn new(config: &Config, session: Session) -> Self {
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ---- auth ----

    /// Form-encoded login. On success the access token and the signed-in
    /// user land in the session.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let resp = self
            .http
            .post(self.url("auth/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;
        let payload: TokenResponse = resp.json().await?;

        let user = payload
            .user
            .map(User::from)
            .ok_or_else(|| ApiError::Http {
                status: 200,
                message: "login response carried no user".to_string(),
            })?;
        self.session.set_token(payload.access_token);
        self.session.set_user(user.clone());
        info!("logged in as {} ({})", user.name, user.role.as_wire());
        Ok(user)
    }

    /// Register a new citizen account. Public, no token attached.
    pub async fn register(&self, body: &Value) -> ApiResult<User> {
        let resp = self.send_public(Method::POST, "auth/register", Some(body)).await?;
        let wire: WireUser = resp.json().await?;
        Ok(User::from(wire))
    }

    /// One silent token refresh via the httpOnly cookie.
    pub async fn refresh(&self) -> ApiResult<()> {
        let resp = self.http.post(self.url("auth/refresh")).send().await?;
        let resp = Self::check_status(resp).await?;
        let payload: TokenResponse = resp.json().await?;
        self.session.set_token(payload.access_token);
        Ok(())
    }

    /// Tell the backend and drop the local session either way.
    pub async fn logout(&self) -> ApiResult<()> {
        if let Err(e) = self.send_authorized(Method::POST, "auth/logout", None).await {
            warn!("logout call failed, clearing session anyway: {}", e);
        }
        self.session.clear();
        self.session.mark_logged_out();
        Ok(())
    }

    // ---- transport ----

    /// Send with the bearer token, refreshing once on a 401.
    pub(crate) async fn send_authorized(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<Response> {
        let resp = self.send_raw(method.clone(), path, body, true).await?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return Self::check_status(resp).await;
        }

        // Exactly one refresh, then one retry of the original request.
        if let Err(e) = self.refresh().await {
            warn!("token refresh failed: {}", e);
            self.force_logout();
            return Err(ApiError::AuthenticationFailed);
        }
        let retried = self.send_raw(method, path, body, true).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            self.force_logout();
            return Err(ApiError::AuthenticationFailed);
        }
        Self::check_status(retried).await
    }

    /// Send without a bearer token (public endpoints: submission, tracking
    /// lookup, registration).
    pub(crate) async fn send_public(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<Response> {
        let resp = self.send_raw(method, path, body, false).await?;
        Self::check_status(resp).await
    }

    async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        authorized: bool,
    ) -> ApiResult<Response> {
        let mut req = self.http.request(method, self.url(path));
        if authorized {
            if let Some(token) = self.session.token() {
                req = req.bearer_auth(token);
            }
        }
        if let Some(json) = body {
            req = req.json(json);
        }
        Ok(req.send().await?)
    }

    fn force_logout(&self) {
        self.session.clear();
        self.session.mark_logged_out();
    }

    /// Non-2xx becomes an error carrying the server-supplied message when
    /// the body had one, otherwise a bare `HTTP <code>`.
    async fn check_status(resp: Response) -> ApiResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let code = status.as_u16();
        let body = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<Value>(&body) {
            Ok(value) => value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or(body),
            Err(_) => body,
        };
        let message = if message.trim().is_empty() {
            format!("HTTP {}", code)
        } else {
            message
        };
        Err(ApiError::Http { status: code, message })
    }
}
