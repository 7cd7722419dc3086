use crate::config::token::{generate_bypass_token, BYPASS_TOKEN_LENGTH};
use crate::crawler::Dispatch;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Cache-Warmer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    /// Seed hostnames or URLs, crawled one after another
    #[serde(default)]
    pub sites: Vec<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum link depth followed from each seed
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Fetch sibling links concurrently instead of one at a time
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Maximum concurrent fetches per recursion level
    #[serde(rename = "max-parallelism", default)]
    pub max_parallelism: Option<usize>,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            parallel: default_parallel(),
            max_parallelism: None,
            request_timeout: default_request_timeout(),
        }
    }
}

impl CrawlerConfig {
    /// Returns the configured parallelism, or twice the available worker threads
    pub fn effective_parallelism(&self) -> usize {
        self.max_parallelism.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                * 2
        })
    }

    /// Returns how sibling links are dispatched
    pub fn dispatch(&self) -> Dispatch {
        if self.parallel {
            Dispatch::Parallel {
                max_parallelism: self.effective_parallelism(),
            }
        } else {
            Dispatch::Sequential
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// Token appended to the User-Agent so the cache layer can recognize the crawler
    #[serde(rename = "bypass-token", default)]
    pub bypass_token: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            bypass_token: None,
        }
    }
}

impl UserAgentConfig {
    /// Returns the configured bypass token, or a freshly generated one
    ///
    /// Call this once at startup and hand the result to the fetcher; every call
    /// without a configured token yields a different value.
    pub fn resolve_bypass_token(&self) -> String {
        match &self.bypass_token {
            Some(token) => token.clone(),
            None => generate_bypass_token(BYPASS_TOKEN_LENGTH),
        }
    }
}

fn default_max_depth() -> u32 {
    10
}

fn default_parallel() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    100
}

fn default_crawler_name() -> String {
    "CacheWarmer".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
