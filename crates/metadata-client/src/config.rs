use serde::Deserialize;
use std::time::Duration;

/// Metadata service configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct MetadataConfig {
    /// TMDB API key (v3 auth)
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_api_url")]
    pub tmdb_api_url: String,

    /// Prefix for poster paths
    #[serde(default = "default_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub tmdb_timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl MetadataConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<MetadataConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load metadata config: {}", e))?
            .validated()
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, MetadataConfig>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load metadata config: {}", e))?
            .validated()
    }

    fn validated(self) -> anyhow::Result<Self> {
        if self.tmdb_timeout_secs == 0 {
            anyhow::bail!("TMDB_TIMEOUT_SECS must be at least 1 second");
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.tmdb_timeout_secs)
    }
}
