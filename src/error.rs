use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything that can go wrong between the portal and the backend.
///
/// Nothing here is retried automatically except the single 401
/// refresh-then-retry cycle inside the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response, carrying the server-supplied message when the body
    /// had one, otherwise `HTTP <code>`.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// A 401 that a single silent token refresh could not recover from.
    /// The session token has already been cleared when this is returned.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rejected by the form layer before any network call was made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The acting role is not allowed to perform this operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::AuthenticationFailed)
    }
}
