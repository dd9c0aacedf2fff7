use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Reddit public JSON API base URL
    #[serde(default = "default_reddit_api_url")]
    pub reddit_api_url: String,

    /// User-Agent sent with every upstream request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Number of hot submissions sampled from the target subreddit
    #[serde(default = "default_sample_size")]
    pub sample_size: u32,

    /// Limit passed to the subreddit search endpoint
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Maximum number of author history lookups in flight at once
    #[serde(default = "default_fanout_concurrency")]
    pub fanout_concurrency: usize,

    /// Timeout applied to each upstream request, in seconds
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    /// Origins allowed by the CORS policy (comma separated in the environment)
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_reddit_api_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_user_agent() -> String {
    concat!("subreddit-recs/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_sample_size() -> u32 {
    50
}

fn default_search_limit() -> u32 {
    100
}

fn default_fanout_concurrency() -> usize {
    8
}

fn default_upstream_timeout_secs() -> u64 {
    10
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:8080".to_string(),
        "https://v0rren.github.io".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            reddit_api_url: default_reddit_api_url(),
            user_agent: default_user_agent(),
            sample_size: default_sample_size(),
            search_limit: default_search_limit(),
            fanout_concurrency: default_fanout_concurrency(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
