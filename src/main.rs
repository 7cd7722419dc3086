//! Cache-Warmer main entry point
//!
//! This is the command-line interface for the Cache-Warmer crawler.

use anyhow::Context;
use cache_warmer::config::{read_config, validate, Config};
use cache_warmer::crawler::crawl;
use cache_warmer::output::print_summary;
use cache_warmer::url::seed_url;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cache-Warmer: pre-populates a caching layer by crawling sites
///
/// Every configured site is crawled from its seed, following same-site links
/// up to the maximum depth. Each request carries the bypass token in its
/// User-Agent so the cache layer can recognize the crawler.
#[derive(Parser, Debug)]
#[command(name = "cache-warmer")]
#[command(version)]
#[command(about = "Warms a cache by crawling sites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Visit pages one at a time instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Override the configured maximum depth
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,

    /// Additional site to warm (repeatable)
    #[arg(long = "site", value_name = "SITE")]
    sites: Vec<String>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = read_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    apply_overrides(&mut config, &cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let summary = crawl(config).await.context("failed to start crawl")?;
    print_summary(&summary);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cache_warmer=info,warn"),
            1 => EnvFilter::new("cache_warmer=debug,info"),
            2 => EnvFilter::new("cache_warmer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides and re-validates the result
fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if cli.sequential {
        config.crawler.parallel = false;
    }
    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
    }
    config.sites.extend(cli.sites.iter().cloned());

    validate(config).context("invalid configuration")?;
    Ok(())
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Cache-Warmer Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Dispatch: {:?}", config.crawler.dispatch());
    println!("  Request timeout: {}s", config.crawler.request_timeout);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!(
        "  Bypass token: {}",
        if config.user_agent.bypass_token.is_some() {
            "configured"
        } else {
            "generated at startup"
        }
    );

    println!("\nSites ({}):", config.sites.len());
    for site in &config.sites {
        match seed_url(site) {
            Ok(url) => println!("  - {} -> {}", site, url),
            Err(e) => println!("  - {} (invalid: {})", site, e),
        }
    }

    println!("\n✓ Configuration is valid");
}
