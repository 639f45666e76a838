use std::sync::{Arc, RwLock};

use crate::models::user::{Role, User};

/// Explicit session state shared between the client and the stores.
///
/// This replaces ambient browser-storage token state: the session is passed
/// into [`crate::client::ApiClient::new`], which keeps the refresh-retry
/// policy testable without any global setup.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

#[derive(Default)]
struct SessionState {
    access_token: Option<String>,
    current_user: Option<User>,
    logged_out: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().unwrap().access_token.clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut state = self.inner.write().unwrap();
        state.access_token = Some(token.into());
        state.logged_out = false;
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.read().unwrap().current_user.clone()
    }

    pub fn set_user(&self, user: User) {
        self.inner.write().unwrap().current_user = Some(user);
    }

    /// Role of the signed-in user, if any.
    pub fn role(&self) -> Option<Role> {
        self.inner.read().unwrap().current_user.as_ref().map(|u| u.role)
    }

    /// Drop the token and the cached user.
    pub fn clear(&self) {
        let mut state = self.inner.write().unwrap();
        state.access_token = None;
        state.current_user = None;
    }

    /// Raised when a 401 could not be recovered by a refresh; the UI layer
    /// watches this flag to send the user back to the login screen.
    pub fn mark_logged_out(&self) {
        self.inner.write().unwrap().logged_out = true;
    }

    pub fn is_logged_out(&self) -> bool {
        self.inner.read().unwrap().logged_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_a_token_clears_the_logged_out_flag() {
        let session = Session::new();
        session.mark_logged_out();
        assert!(session.is_logged_out());

        session.set_token("fresh-token");
        assert!(!session.is_logged_out());
        assert_eq!(session.token().as_deref(), Some("fresh-token"));
    }

    #[test]
    fn clear_drops_token_and_user() {
        let session = Session::new();
        session.set_token("tok");
        session.clear();
        assert!(session.token().is_none());
        assert!(session.current_user().is_none());
    }
}
