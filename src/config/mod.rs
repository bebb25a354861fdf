use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub identity_api_url: String,
    pub identity_timeout_ms: u64,
    pub session_cookie_max_age_days: i64,
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            identity_api_url: env::var("IDENTITY_API_URL")?
                .trim_end_matches('/')
                .to_string(),
            identity_timeout_ms: env::var("IDENTITY_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            session_cookie_max_age_days: env::var("SESSION_COOKIE_MAX_AGE_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .unwrap_or(7),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
        })
    }

    /// Configuration pointing at the given identity service, with defaults
    /// for everything else.
    pub fn for_identity(identity_api_url: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            identity_api_url: identity_api_url.trim_end_matches('/').to_string(),
            identity_timeout_ms: 5000,
            session_cookie_max_age_days: 7,
            frontend_url: "http://localhost:3001".to_string(),
        }
    }

    pub fn identity_timeout(&self) -> Duration {
        Duration::from_millis(self.identity_timeout_ms)
    }
}
