use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

/// Staff and citizen roles, ordered by authority (a manager outranks an
/// admin, an admin outranks a mukhtar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Citizen,
    Muktar,
    Admin,
    Manager,
}

impl Role {
    /// Parse a backend role string, case-insensitively. Anything the backend
    /// sends that we do not recognize is treated as a plain citizen.
    pub fn parse(raw: &str) -> Role {
        match raw.to_lowercase().as_str() {
            "manager" => Role::Manager,
            "admin" => Role::Admin,
            "mukhtar" | "muktar" => Role::Muktar,
            "citizen" => Role::Citizen,
            other => {
                if !other.is_empty() {
                    warn!("unrecognized role string {:?}, treating as citizen", other);
                }
                Role::Citizen
            }
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::Muktar => "mukhtar",
            Role::Citizen => "citizen",
        }
    }

    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Citizen)
    }
}

/// A staff or citizen account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub role: Role,
    /// Home district; meaningful for mukhtars, usually empty otherwise.
    pub district: Option<String>,
    pub email: String,
    pub name: String,
    pub joined_at: DateTime<Utc>,
    pub active: bool,
}
