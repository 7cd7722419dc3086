//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with the bypass token
//! - HTML parsing and href extraction
//! - Choosing and claiming the next targets
//! - Sequential or bounded-parallel dispatch of child visits
//! - Per-site coordination

mod coordinator;
mod engine;
mod fetcher;
mod frontier;
mod parser;
mod scheduler;

#[cfg(test)]
mod testing;

pub use coordinator::{crawl_site, Coordinator};
pub use engine::{Crawler, VisitFuture};
pub use fetcher::{
    build_http_client, fetch_url, user_agent, Fetch, FetchResult, HttpFetcher, PageResult,
};
pub use frontier::{candidate_links, claim_children};
pub use parser::{extract_hrefs, ParseError};
pub use scheduler::{dispatch_children, run_branch, BranchTally, Dispatch, MAX_PARALLELISM};

use crate::config::Config;
use crate::output::RunSummary;
use crate::WarmerError;

/// Runs a complete warm-up of every configured site
///
/// # Returns
///
/// * `Ok(RunSummary)` - Every site was attempted; check the reports for failures
/// * `Err(WarmerError)` - The crawl could not start
pub async fn crawl(config: Config) -> Result<RunSummary, WarmerError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
