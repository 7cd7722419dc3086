use dashmap::DashSet;

/// Set of canonical URLs already claimed for a fetch during one site run
///
/// This is the only structure the crawl mutates concurrently. Claims are an
/// atomic test-and-set: of any number of concurrent `try_claim` calls for the
/// same URL, exactly one returns true. Keys compare case-insensitively and are
/// never removed.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` and returns true if nobody claimed it before
    pub fn try_claim(&self, url: &str) -> bool {
        self.urls.insert(url.to_lowercase())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(&url.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Returns the claimed keys in sorted order
    pub fn snapshot(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.urls.iter().map(|url| url.key().clone()).collect();
        urls.sort();
        urls
    }
}
