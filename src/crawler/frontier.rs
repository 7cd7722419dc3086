//! Deciding what to crawl next
//!
//! Turning a page's raw hrefs into child targets is kept free of network and
//! parsing so it can be tested on its own. The only shared state it touches is
//! the `VisitedSet`, through its atomic claim.

use crate::state::{CrawlTarget, VisitedSet};
use crate::url::{normalize_link, CanonicalUrl};
use std::collections::HashSet;
use url::Url;

/// Normalizes hrefs found on `referrer` into distinct same-site URLs
///
/// Order of first appearance is kept. Every rejected href is logged once at
/// debug level.
pub fn candidate_links<'a, I>(referrer: &Url, hrefs: I) -> Vec<CanonicalUrl>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for href in hrefs {
        match normalize_link(referrer, href) {
            Ok(url) => {
                if seen.insert(url.as_str().to_string()) {
                    candidates.push(url);
                }
            }
            Err(rejection) => {
                tracing::debug!("Skipping link {:?} on {}: {}", href, referrer, rejection);
            }
        }
    }

    candidates
}

/// Claims each candidate and returns targets for the ones nobody claimed before
pub fn claim_children(
    parent: &CrawlTarget,
    candidates: Vec<CanonicalUrl>,
    visited: &VisitedSet,
) -> Vec<CrawlTarget> {
    candidates
        .into_iter()
        .filter(|url| visited.try_claim(url.as_str()))
        .map(|url| parent.child(url))
        .collect()
}
