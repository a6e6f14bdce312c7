use std::env;
use std::time::Duration;

/// Upper bound for `SESSION_MAX_AGE_SECS`, ten years.
pub const MAX_SESSION_MAX_AGE_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Signing key used when `SECRET_KEY` is not set. Only suitable for local development.
pub const DEFAULT_SECRET_KEY: &str = "change-this-secret";

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_BASE_URL is not a valid http(s) URL: {0}")]
    InvalidApiBaseUrl(String),

    #[error("SECRET_KEY must not be empty")]
    EmptySecretKey,

    #[error("SESSION_MAX_AGE_SECS must be between 1 and {max}: {value}")]
    InvalidSessionMaxAge { value: i64, max: i64 },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub api_base_url: String,
    pub secret_key: String,
    pub teams_timeout_secs: u64,
    pub record_timeout_secs: u64,
    pub session_max_age_secs: i64,
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_base_url = parsed("API_BASE_URL", "http://127.0.0.1:5000")
            .trim_end_matches('/')
            .to_string();
        match reqwest::Url::parse(&api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidApiBaseUrl(api_base_url)),
        }

        let secret_key = parsed("SECRET_KEY", DEFAULT_SECRET_KEY);
        if secret_key.is_empty() {
            return Err(ConfigError::EmptySecretKey);
        }

        let session_max_age_secs: i64 = parsed("SESSION_MAX_AGE_SECS", "86400")
            .parse()
            .unwrap_or(86400);
        if !(1..=MAX_SESSION_MAX_AGE_SECS).contains(&session_max_age_secs) {
            return Err(ConfigError::InvalidSessionMaxAge {
                value: session_max_age_secs,
                max: MAX_SESSION_MAX_AGE_SECS,
            });
        }

        Ok(Self {
            database_url: parsed("DATABASE_URL", "sqlite://users.db"),
            database_max_connections: parsed("DATABASE_MAX_CONNECTIONS", "5")
                .parse()
                .unwrap_or(5),
            host: parsed("BIND_HOST", "127.0.0.1"),
            port: parsed("PORT", "7000").parse().unwrap_or(7000),
            api_base_url,
            secret_key,
            teams_timeout_secs: parsed("TEAMS_TIMEOUT_SECS", "10").parse().unwrap_or(10),
            record_timeout_secs: parsed("RECORD_TIMEOUT_SECS", "15").parse().unwrap_or(15),
            session_max_age_secs,
            cookie_secure: parsed("COOKIE_SECURE", "false")
                .parse()
                .unwrap_or(false),
        })
    }

    pub fn teams_timeout(&self) -> Duration {
        Duration::from_secs(self.teams_timeout_secs)
    }

    pub fn record_timeout(&self) -> Duration {
        Duration::from_secs(self.record_timeout_secs)
    }

    /// True when the signing key is still the development placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}
