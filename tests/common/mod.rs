// Shared helpers for the integration tests: an in-process stub backend and
// canned sessions/payloads.

use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use complaint_portal::{Role, Session, User};

/// Bind the stub router on an ephemeral port and return the base URL the
/// client should be pointed at (including the version prefix).
pub async fn spawn_stub(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A signed-in staff session carrying a (stale) token.
#[allow(dead_code)]
pub fn staff_session(role: Role) -> Session {
    let session = Session::new();
    session.set_token("stale-token");
    session.set_user(User {
        id: format!("staff-{}", role.as_wire()),
        role,
        district: None,
        email: format!("{}@portal.example", role.as_wire()),
        name: "Test Staffer".to_string(),
        joined_at: Utc::now(),
        active: true,
    });
    session
}

/// A backend complaint record in wire shape.
#[allow(dead_code)]
pub fn wire_complaint_json(id: &str, priority: &str, status: &str) -> Value {
    json!({
        "id": id,
        "trackingTag": format!("TRK-{}", id),
        "neighborhood": "Harbor",
        "complaint_type": "infrastructure",
        "priority": priority,
        "title": "Streetlight out at pier entrance",
        "description": "The lamp at the pier gate has been dark for a week.",
        "contactNumber": "+96170123456",
        "submitterName": "R. Demir",
        "complaint_status": status,
        "createdAt": "2026-08-01T10:00:00Z",
        "updatedAt": "2026-08-02T09:30:00Z",
        "attachments": []
    })
}
