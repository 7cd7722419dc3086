//! Dispatching child visits
//!
//! A page's children run either one after another, in link order, or
//! concurrently on the runtime's worker threads. In parallel mode each recursion
//! level gets its own semaphore, so the cap applies per level: a crawl of depth
//! `d` can have up to `d * max_parallelism` fetches in flight. There is no
//! global admission control.
//!
//! Every child runs in its own task. A panic inside a branch is caught at the
//! join handle, logged with the branch URL, and counted as a failed branch; it
//! never reaches siblings or the parent.

use crate::crawler::engine::Crawler;
use crate::crawler::fetcher::Fetch;
use crate::state::CrawlTarget;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Largest cap a level semaphore can hold
pub const MAX_PARALLELISM: usize = Semaphore::MAX_PERMITS;

/// How sibling links are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// One page at a time, depth-first, in link order
    Sequential,
    /// Up to `max_parallelism` sibling branches at once per level
    Parallel { max_parallelism: usize },
}

/// Success and failure counts of a set of child branches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchTally {
    pub succeeded: usize,
    pub failed: usize,
}

impl BranchTally {
    fn record(&mut self, success: bool) {
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Runs a single branch in its own task and waits for it
pub async fn run_branch<F: Fetch>(crawler: Arc<Crawler<F>>, target: CrawlTarget) -> bool {
    let url = target.url.clone();
    match tokio::spawn(crawler.visit(target)).await {
        Ok(success) => success,
        Err(e) => {
            tracing::error!("Branch at {} aborted: {}", url, e);
            false
        }
    }
}

/// Visits all children of one page according to `dispatch`
pub async fn dispatch_children<F: Fetch>(
    crawler: &Arc<Crawler<F>>,
    children: Vec<CrawlTarget>,
    dispatch: Dispatch,
) -> BranchTally {
    let mut tally = BranchTally::default();

    match dispatch {
        Dispatch::Sequential => {
            for child in children {
                tally.record(run_branch(Arc::clone(crawler), child).await);
            }
        }
        Dispatch::Parallel { max_parallelism } => {
            let permits = Arc::new(Semaphore::new(max_parallelism.clamp(1, MAX_PARALLELISM)));
            let mut branches = JoinSet::new();

            for child in children {
                let permit = match Arc::clone(&permits).acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };
                let crawler = Arc::clone(crawler);
                branches.spawn(async move {
                    let _permit = permit;
                    run_branch(crawler, child).await
                });
            }

            while let Some(joined) = branches.join_next().await {
                match joined {
                    Ok(success) => tally.record(success),
                    // Panics are already reported by run_branch; this is cancellation
                    Err(e) => {
                        tracing::error!("Branch task aborted: {}", e);
                        tally.record(false);
                    }
                }
            }
        }
    }

    tally
}
