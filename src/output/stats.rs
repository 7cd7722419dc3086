//! Per-site reports and the run summary

use std::time::Duration;

/// Outcome of warming one site
#[derive(Debug, Clone, PartialEq)]
pub struct SiteReport {
    /// The site as configured
    pub site: String,

    /// Whether the seed page itself was fetched successfully
    pub success: bool,

    /// Number of URLs claimed (and therefore fetched) during the run
    pub pages_visited: usize,

    /// Wall-clock time spent on the site
    pub elapsed: Duration,
}

impl SiteReport {
    pub fn new(site: &str, success: bool, pages_visited: usize, elapsed: Duration) -> Self {
        Self {
            site: site.to_string(),
            success,
            pages_visited,
            elapsed,
        }
    }

    pub fn status(&self) -> &'static str {
        if self.success {
            "ok"
        } else {
            "failed"
        }
    }
}

/// Reports for every site of one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub sites: Vec<SiteReport>,
}

impl RunSummary {
    pub fn new(sites: Vec<SiteReport>) -> Self {
        Self { sites }
    }

    pub fn succeeded(&self) -> usize {
        self.sites.iter().filter(|s| s.success).count()
    }

    pub fn failed(&self) -> usize {
        self.sites.len() - self.succeeded()
    }

    pub fn total_pages(&self) -> usize {
        self.sites.iter().map(|s| s.pages_visited).sum()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.sites.iter().map(|s| s.elapsed).sum()
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Warm-up Summary ===\n");

    for report in &summary.sites {
        println!(
            "  [{}] {}: {} pages in {:.1?}",
            report.status(),
            report.site,
            report.pages_visited,
            report.elapsed
        );
    }
    println!();

    println!(
        "Sites: {} ok, {} failed; {} pages in {:.1?}",
        summary.succeeded(),
        summary.failed(),
        summary.total_pages(),
        summary.total_elapsed()
    );
}
