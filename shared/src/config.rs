use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub upstream_base_url: String,
    pub cache_ttl: Duration,
    pub cache_max_entries: Option<u64>,
    pub allowed_origins: Vec<String>,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 3001;
    pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://api.aviationstack.com/v1";
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = var("AVIATIONSTACK_API_KEY");
        if api_key.is_none() {
            warn!("AVIATIONSTACK_API_KEY not set, upstream calls will be rejected");
        }

        Self {
            host: var("HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            port: var("PORT")
                .and_then(|v| v.trim().parse::<u16>().ok())
                .unwrap_or(Self::DEFAULT_PORT),
            api_key,
            upstream_base_url: var("AVIATIONSTACK_BASE_URL")
                .unwrap_or_else(|| Self::DEFAULT_UPSTREAM_BASE_URL.to_string()),
            cache_ttl: Duration::from_secs(
                var("CACHE_TTL_SECS")
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .unwrap_or(Self::DEFAULT_CACHE_TTL_SECS),
            ),
            cache_max_entries: var("CACHE_MAX_ENTRIES").and_then(|v| v.trim().parse::<u64>().ok()),
            allowed_origins: var("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            static_dir: var("STATIC_DIR").map(PathBuf::from),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The API key as it may appear in logs: `***` plus its last four characters.
    pub fn masked_api_key(&self) -> String {
        match &self.api_key {
            Some(key) => {
                let tail: String = key
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("***{}", tail)
            }
            None => "NOT SET".to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.masked_api_key())
            .field("upstream_base_url", &self.upstream_base_url)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_max_entries", &self.cache_max_entries)
            .field("allowed_origins", &self.allowed_origins)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}
