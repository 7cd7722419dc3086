//! Crawl engine: one page visit and the recursion below it
//!
//! A visit fetches its page, stops on any failure or at the depth limit, and
//! otherwise extracts links, claims the unseen same-site ones in the shared
//! `VisitedSet`, and hands them to the scheduler. URLs are always claimed by the
//! parent before a child is scheduled, so a page is fetched at most once per
//! site run. Which parent wins a claim is nondeterministic in parallel mode.

use crate::crawler::fetcher::{Fetch, FetchResult};
use crate::crawler::frontier::{candidate_links, claim_children};
use crate::crawler::parser::extract_hrefs;
use crate::crawler::scheduler::{dispatch_children, run_branch, Dispatch};
use crate::state::{CrawlTarget, VisitedSet};
use crate::url::CanonicalUrl;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future of a single visit, resolving to the page's own success
pub type VisitFuture = Pin<Box<dyn Future<Output = bool> + Send + 'static>>;

/// Crawl state for a single site run
pub struct Crawler<F> {
    fetcher: F,
    visited: VisitedSet,
    max_depth: u32,
    dispatch: Dispatch,
}

impl<F: Fetch> Crawler<F> {
    /// Creates a crawler with an empty visited set
    pub fn new(fetcher: F, max_depth: u32, dispatch: Dispatch) -> Self {
        Self {
            fetcher,
            visited: VisitedSet::new(),
            max_depth,
            dispatch,
        }
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Claims `seed` and crawls everything reachable from it
    ///
    /// Returns whether the seed page itself was fetched successfully.
    pub async fn crawl(self: &Arc<Self>, seed: CanonicalUrl) -> bool {
        self.visited.try_claim(seed.as_str());
        run_branch(Arc::clone(self), CrawlTarget::seed(seed)).await
    }

    /// Visits one already-claimed target and, below the depth limit, its children
    pub fn visit(self: Arc<Self>, target: CrawlTarget) -> VisitFuture {
        Box::pin(async move { self.visit_page(target).await })
    }

    async fn visit_page(self: Arc<Self>, target: CrawlTarget) -> bool {
        let result = self.fetcher.fetch(&target.url).await;

        let body = match result.outcome {
            FetchResult::Success { body, .. } => {
                tracing::info!(
                    "{} fetched in {} ms (depth {})",
                    target.url,
                    result.elapsed.as_millis(),
                    target.depth
                );
                body
            }
            FetchResult::HttpError {
                status_code,
                reason,
            } => {
                tracing::warn!(
                    "Failed {} (depth {}): HTTP {} {}",
                    target.url,
                    target.depth,
                    status_code,
                    reason
                );
                return false;
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed {} (depth {}): {}", target.url, target.depth, error);
                return false;
            }
        };

        if target.depth >= self.max_depth {
            tracing::debug!("Depth limit reached at {}", target.url);
            return true;
        }

        let hrefs = match extract_hrefs(&body) {
            Ok(hrefs) => hrefs,
            Err(e) => {
                tracing::warn!("Failed to parse HTML for {}: {}", target.url, e);
                Vec::new()
            }
        };

        let candidates = candidate_links(&target.url, hrefs.iter().map(String::as_str));
        let inner_links = candidates.len();
        let children = claim_children(&target, candidates, &self.visited);
        tracing::info!(
            "{} has {} inner links ({} new)",
            target.url,
            inner_links,
            children.len()
        );

        if !children.is_empty() {
            let tally = dispatch_children(&self, children, self.dispatch).await;
            if tally.failed > 0 {
                tracing::debug!(
                    "{} of {} branches below {} failed",
                    tally.failed,
                    tally.failed + tally.succeeded,
                    target.url
                );
            }
        }

        true
    }
}
