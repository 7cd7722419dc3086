use crate::url::CanonicalUrl;
use url::Url;

/// A page scheduled for a visit
///
/// Seeds start at depth 0; each followed link is one deeper than its referrer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: Url,
    pub depth: u32,
}

impl CrawlTarget {
    pub fn new(url: Url, depth: u32) -> Self {
        Self { url, depth }
    }

    /// Creates the depth-0 target for a seed page
    pub fn seed(url: CanonicalUrl) -> Self {
        Self::new(url.into_url(), 0)
    }

    /// Creates a target for a link found on this page
    pub fn child(&self, url: CanonicalUrl) -> Self {
        Self::new(url.into_url(), self.depth + 1)
    }
}
