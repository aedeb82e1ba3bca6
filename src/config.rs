use crate::options::GAME_OPTIONS_URL;
use crate::types::DEFAULT_REVEAL_DURATION;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 6574;

/// Process-level settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (all interfaces)
    pub port: u16,
    /// Where the options list is fetched from
    pub options_url: String,
    /// How long a role reveal stays visible
    pub reveal_duration: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            options_url: GAME_OPTIONS_URL.to_string(),
            reveal_duration: DEFAULT_REVEAL_DURATION,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: non_empty_var("IMPOSTER_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            options_url: non_empty_var("IMPOSTER_OPTIONS_URL").unwrap_or(defaults.options_url),
            reveal_duration: non_empty_var("IMPOSTER_REVEAL_MS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.reveal_duration),
        }
    }
}
