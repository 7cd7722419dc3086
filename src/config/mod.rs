//! Configuration module for Cache-Warmer
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and resolving the bypass token sent with every request.
//!
//! # Example
//!
//! ```no_run
//! use cache_warmer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("warmer.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod token;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, UserAgentConfig};

pub use parser::{load_config, parse_config, read_config};
pub use token::{generate_bypass_token, BYPASS_TOKEN_LENGTH};
pub use validation::validate;
