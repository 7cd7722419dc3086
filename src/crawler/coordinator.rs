//! Crawler coordinator - runs every configured site
//!
//! Sites are warmed one after another. Each gets a fresh `Crawler`, and with it a
//! fresh visited set; only the HTTP client is shared between sites.

use crate::config::Config;
use crate::crawler::engine::Crawler;
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::scheduler::Dispatch;
use crate::output::{RunSummary, SiteReport};
use crate::url::{seed_url, CanonicalUrl};
use crate::WarmerError;
use std::sync::Arc;
use std::time::Instant;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    fetcher: HttpFetcher,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Resolves the bypass token (generating one when none is configured) and
    /// builds the HTTP client that carries it.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(WarmerError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, WarmerError> {
        let bypass_token = config.user_agent.resolve_bypass_token();
        let fetcher = HttpFetcher::from_config(
            &config.user_agent,
            &bypass_token,
            config.crawler.request_timeout(),
        )?;

        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls every configured site in order
    pub async fn run(&self) -> RunSummary {
        let dispatch = self.config.crawler.dispatch();
        tracing::info!(
            "Warming {} sites (max depth {}, {:?})",
            self.config.sites.len(),
            self.config.crawler.max_depth,
            dispatch
        );

        let mut reports = Vec::with_capacity(self.config.sites.len());
        for site in &self.config.sites {
            let report = crawl_site(
                self.fetcher.clone(),
                site,
                self.config.crawler.max_depth,
                dispatch,
            )
            .await;
            reports.push(report);
        }

        RunSummary::new(reports)
    }
}

/// Warms a single site from its seed
///
/// The seed is prefixed with `http://` when it has no scheme, claimed, and
/// crawled to `max_depth`. An unusable seed yields a failed report.
pub async fn crawl_site<F: Fetch>(
    fetcher: F,
    site: &str,
    max_depth: u32,
    dispatch: Dispatch,
) -> SiteReport {
    let started = Instant::now();
    tracing::info!("==> Start {}", site);

    let seed = match seed_url(site) {
        Ok(url) => CanonicalUrl::from_url(url),
        Err(e) => {
            tracing::warn!("Skipping site {}: {}", site, e);
            let report = SiteReport::new(site, false, 0, started.elapsed());
            tracing::info!("<== End {}: {}", site, report.status());
            return report;
        }
    };

    let crawler = Arc::new(Crawler::new(fetcher, max_depth, dispatch));
    let success = crawler.crawl(seed).await;

    let report = SiteReport::new(site, success, crawler.visited().len(), started.elapsed());
    tracing::info!(
        "<== End {}: {} pages in {:.1?} ({})",
        site,
        report.pages_visited,
        report.elapsed,
        report.status()
    );
    report
}
