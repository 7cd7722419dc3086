//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlTarget`: a URL scheduled for a visit, with its link depth
//! - `VisitedSet`: the per-site set of URLs already claimed for a fetch

mod target;
mod visited;

// Re-export main types
pub use target::CrawlTarget;
pub use visited::VisitedSet;
