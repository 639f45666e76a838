// src/lib.rs

//! Client layer for the municipal complaint portal: typed API client with
//! bearer auth and refresh-retry, role visibility rules, the complaint
//! lifecycle, and the cached complaint store the staff dashboards read from.

pub mod boards;
pub mod client;
pub mod complaints;
pub mod config;
pub mod dashboard;
pub mod demo_data;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod session;
pub mod users;
pub mod validation;
pub mod visibility;
pub mod wire;

pub use client::ApiClient;
pub use complaints::{AttachmentUpload, ComplaintsStore, NewComplaint};
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use models::complaint::{Assignment, Complaint, ComplaintStatus, Importance, DISTRICTS};
pub use models::content::{Achievement, Announcement};
pub use models::user::{Role, User};
pub use session::Session;
