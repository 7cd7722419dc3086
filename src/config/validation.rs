use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::crawler::MAX_PARALLELISM;
use crate::url::seed_url;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_sites(&config.sites)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1 second, got {}",
            config.request_timeout
        )));
    }

    if let Some(max) = config.max_parallelism {
        if max < 1 {
            return Err(ConfigError::Validation(format!(
                "max_parallelism must be >= 1, got {}",
                max
            )));
        }
        if max > MAX_PARALLELISM {
            return Err(ConfigError::Validation(format!(
                "max_parallelism must be <= {}, got {}",
                MAX_PARALLELISM, max
            )));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(token) = &config.bypass_token {
        validate_bypass_token(token)?;
    }

    Ok(())
}

/// The token ends up inside the User-Agent header value
fn validate_bypass_token(token: &str) -> Result<(), ConfigError> {
    if token.is_empty() {
        return Err(ConfigError::Validation(
            "bypass_token cannot be empty".to_string(),
        ));
    }

    if !token.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ConfigError::Validation(
            "bypass_token must contain only visible ASCII characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates the seed site list
fn validate_sites(sites: &[String]) -> Result<(), ConfigError> {
    if sites.is_empty() {
        return Err(ConfigError::Validation(
            "at least one site must be configured".to_string(),
        ));
    }

    for site in sites {
        seed_url(site)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site '{}': {}", site, e)))?;
    }

    Ok(())
}
