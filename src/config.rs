use std::env;

#[derive(Clone)]
pub struct Config {
    /// Base URL of the backend, including the version prefix.
    pub api_base_url: String,
    /// Interval for the polling auto-refresh of the complaint list.
    pub refresh_interval_secs: u64,
    /// Substitute the static demo dataset when fetching complaints fails or
    /// comes back empty. On by default; deployments against a live backend
    /// that want to see legitimately empty lists turn it off.
    pub demo_fallback: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let refresh_interval_secs = env::var("PORTAL_REFRESH_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);
        let demo_fallback = env::var("PORTAL_DEMO_FALLBACK")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        Self {
            api_base_url: env::var("PORTAL_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/v1".to_string()),
            refresh_interval_secs,
            demo_fallback,
        }
    }

    /// Convenience for tests and tools that point the client at a specific
    /// backend instead of reading the environment.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            refresh_interval_secs: 30,
            demo_fallback: true,
        }
    }
}
