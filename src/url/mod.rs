//! URL handling module for Cache-Warmer
//!
//! This module provides seed normalization, link normalization, the same-site
//! check, and the path rules deciding which links are worth warming. Everything
//! here is pure: no I/O, no shared state.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, is_same_site};
pub use matcher::{has_crawlable_extension, is_excluded_path};
pub use normalize::{normalize_link, seed_url, CanonicalUrl, Rejection};
