use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// YouTube Data API key
    pub youtube_api_key: String,

    /// YouTube Data API base URL
    #[serde(default = "default_youtube_api_url")]
    pub youtube_api_url: String,

    /// Prefix joined with a video id to build the reference URL stored in profiles
    #[serde(default = "default_reference_url_prefix")]
    pub reference_url_prefix: String,

    /// Number of candidates requested from the provider per cycle
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Upper bound on a single provider search
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Query used for emotions missing from the query table
    #[serde(default = "default_fallback_query")]
    pub fallback_query: String,

    /// Directory holding one JSON profile per user (used when no database is configured)
    #[serde(default = "default_profile_dir")]
    pub profile_dir: String,

    /// PostgreSQL connection URL; profiles are stored in Postgres when set
    #[serde(default)]
    pub database_url: Option<String>,

    /// Redis connection URL; provider search results are cached when set
    #[serde(default)]
    pub redis_url: Option<String>,

    /// TTL of cached provider search results
    #[serde(default = "default_search_cache_ttl_secs")]
    pub search_cache_ttl_secs: u64,

    /// Fixed seed for the selector; entropy-seeded when unset
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_youtube_api_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_reference_url_prefix() -> String {
    "https://www.youtube.com/watch?v=".to_string()
}

fn default_max_results() -> u32 {
    10
}

fn default_provider_timeout_secs() -> u64 {
    10
}

fn default_fallback_query() -> String {
    crate::services::query_mapper::DEFAULT_FALLBACK_QUERY.to_string()
}

fn default_profile_dir() -> String {
    "user_profiles".to_string()
}

fn default_search_cache_ttl_secs() -> u64 {
    900
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.youtube_api_key.trim().is_empty() {
            anyhow::bail!("YOUTUBE_API_KEY must not be empty");
        }
        if self.max_results == 0 {
            anyhow::bail!("MAX_RESULTS must be at least 1");
        }
        if self.provider_timeout_secs == 0 {
            anyhow::bail!("PROVIDER_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(vars: &[(&str, &str)]) -> Config {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>();
        envy::from_iter::<_, Config>(vars).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let config = parse(&[("YOUTUBE_API_KEY", "secret")]);
        assert_eq!(config.max_results, 10);
        assert_eq!(config.provider_timeout_secs, 10);
        assert_eq!(config.fallback_query, "motivational videos");
        assert_eq!(config.reference_url_prefix, "https://www.youtube.com/watch?v=");
        assert_eq!(config.profile_dir, "user_profiles");
        assert!(config.database_url.is_none());
        assert!(config.redis_url.is_none());
        assert!(config.rng_seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            ("YOUTUBE_API_KEY", "secret"),
            ("MAX_RESULTS", "25"),
            ("RNG_SEED", "42"),
            ("REDIS_URL", "redis://cache:6379"),
        ]);
        assert_eq!(config.max_results, 25);
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
    }

    #[test]
    fn test_zero_max_results_rejected() {
        let config = parse(&[("YOUTUBE_API_KEY", "secret"), ("MAX_RESULTS", "0")]);
        assert!(config.validate().is_err());
    }
}
