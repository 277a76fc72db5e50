use std::str::FromStr;
use std::time::Duration;

pub const LOCAL_API_BASE: &str = "http://localhost:8000/api";
pub const REMOTE_API_BASE: &str = "https://finanalyses.onrender.com/api";

/// Local hosts talk to a local API, everything else to the hosted one.
pub fn api_base_for_host(host: &str) -> &'static str {
    if host.contains("localhost") || host.contains("127.0.0.1") {
        LOCAL_API_BASE
    } else {
        REMOTE_API_BASE
    }
}

pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Configuration for the dashboard API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    /// Unset means requests wait for the API indefinitely.
    pub timeout: Option<Duration>,
    /// Total requests made for one call while the API answers 429. 1 disables retry.
    pub max_attempts: u32,
    pub retry_wait: Duration,
}

impl ClientConfig {
    /// Reads `FINANALYSE_API_BASE`, or sniffs `FINANALYSE_HOST` when unset.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base = std::env::var("FINANALYSE_API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                let host = std::env::var("FINANALYSE_HOST").unwrap_or_else(|_| "localhost".to_string());
                api_base_for_host(&host).to_string()
            });

        Self {
            api_base,
            timeout: std::env::var("FINANALYSE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs),
            max_attempts: env_or("FINANALYSE_MAX_ATTEMPTS", 1),
            retry_wait: Duration::from_secs(env_or("FINANALYSE_RETRY_WAIT_SECS", 5)),
        }
    }

    pub fn with_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: LOCAL_API_BASE.to_string(),
            timeout: None,
            max_attempts: 1,
            retry_wait: Duration::from_secs(5),
        }
    }
}
