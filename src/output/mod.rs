//! Output module for crawl reports
//!
//! This module handles:
//! - Recording the outcome of each site run
//! - Printing the end-of-run summary

pub mod stats;

pub use stats::{print_summary, RunSummary, SiteReport};
