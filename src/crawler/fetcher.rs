//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the bypass token in its user agent
//! - GET requests bounded by the configured timeout
//! - Mapping every response or transport failure to a `PageResult`

use crate::config::UserAgentConfig;
use crate::error_chain;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::{Duration, Instant};
use url::Url;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// HTTP 200 with a readable body
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
        /// Canonical reason phrase, if the status has one
        reason: String,
    },

    /// Network error (connection refused, timeout, DNS, reset body)
    NetworkError {
        /// Error description including its cause chain
        error: String,
    },
}

/// Outcome of one fetch plus how long it took
#[derive(Debug, Clone)]
pub struct PageResult {
    pub elapsed: Duration,
    pub outcome: FetchResult,
}

impl PageResult {
    pub fn new(outcome: FetchResult, elapsed: Duration) -> Self {
        Self { elapsed, outcome }
    }
}

/// Anything able to fetch a page for the crawl engine
///
/// Implementations never fail across this boundary: every failure is reported
/// through `FetchResult`.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> impl Future<Output = PageResult> + Send;
}

/// Fetcher backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client and wraps it
    pub fn from_config(
        config: &UserAgentConfig,
        bypass_token: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config, bypass_token, timeout)?))
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = PageResult> + Send {
        fetch_url(&self.client, url)
    }
}

/// Formats the User-Agent value: `Name/Version <bypass-token>`
pub fn user_agent(config: &UserAgentConfig, bypass_token: &str) -> String {
    format!(
        "{}/{} {}",
        config.crawler_name, config.crawler_version, bypass_token
    )
}

/// Builds an HTTP client with proper configuration
///
/// The bypass token is appended verbatim to the User-Agent header of every
/// request so the caching layer can recognize crawler traffic.
///
/// # Example
///
/// ```no_run
/// use cache_warmer::config::UserAgentConfig;
/// use cache_warmer::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig::default();
/// let client = build_http_client(&config, "token123", Duration::from_secs(100)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    bypass_token: &str,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent(config, bypass_token))
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, converting every failure into a `FetchResult`
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200, body read | Success |
/// | Any other status | HttpError |
/// | Timeout, DNS, connect, body read failure | NetworkError |
///
/// Nothing is retried.
pub async fn fetch_url(client: &Client, url: &Url) -> PageResult {
    let started = Instant::now();

    let outcome = match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();

            if status != StatusCode::OK {
                FetchResult::HttpError {
                    status_code: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                }
            } else {
                match response.text().await {
                    Ok(body) => FetchResult::Success {
                        status_code: status.as_u16(),
                        body,
                    },
                    Err(e) => FetchResult::NetworkError {
                        error: error_chain(&e),
                    },
                }
            }
        }
        Err(e) => {
            // Classify error
            let error = if e.is_timeout() {
                format!("Request timeout: {}", error_chain(&e))
            } else if e.is_connect() {
                format!("Connection failed: {}", error_chain(&e))
            } else {
                error_chain(&e)
            };
            FetchResult::NetworkError { error }
        }
    };

    PageResult::new(outcome, started.elapsed())
}
