use finanalyse_client::ClientConfig;
use financial_score::MissingDataPolicy;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CACHE_TTL_SECS: i64 = 300;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub cache_ttl_secs: i64,
    pub policy: MissingDataPolicy,
    pub client: ClientConfig,
}

impl ServerConfig {
    /// `FINANALYSE_PORT`, `FINANALYSE_CACHE_TTL_SECS`, `FINANALYSE_MISSING_DATA`
    /// (`zero` or `exclude`) plus the client variables.
    pub fn from_env() -> Self {
        let client = ClientConfig::from_env();

        let port = std::env::var("FINANALYSE_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let cache_ttl_secs = std::env::var("FINANALYSE_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);
        let policy = match std::env::var("FINANALYSE_MISSING_DATA") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring FINANALYSE_MISSING_DATA: {}", e);
                MissingDataPolicy::default()
            }),
            Err(_) => MissingDataPolicy::default(),
        };

        Self {
            port,
            cache_ttl_secs,
            policy,
            client,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            policy: MissingDataPolicy::default(),
            client: ClientConfig::default(),
        }
    }
}
