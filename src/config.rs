//! Application configuration loaded from environment variables.
//!
//! Everything has a sensible development default, so `from_env()` never
//! fails; production deployments override via the environment or a `.env`
//! file.

use std::env;
use std::time::Duration;

/// Dashboard core configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the dashboard backend (token exchange + metric endpoints)
    pub api_url: String,
    /// Discord OAuth client ID (public)
    pub discord_client_id: String,
    /// Period between metric poll cycles
    pub poll_interval: Duration,
}

/// Default poll period between metric fetch cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

impl Default for Config {
    /// Default config for testing and local development.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            discord_client_id: "1231886560606158859".to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `RURI_API_URL`, `RURI_DISCORD_CLIENT_ID`,
    /// `RURI_POLL_INTERVAL_SECS`. Missing or unparsable values fall back to
    /// the defaults above.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Self {
            api_url: env::var("RURI_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            discord_client_id: env::var("RURI_DISCORD_CLIENT_ID")
                .unwrap_or(defaults.discord_client_id),
            poll_interval: env::var("RURI_POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
        }
    }
}
