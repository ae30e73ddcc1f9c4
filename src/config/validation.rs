use crate::config::types::{Config, CrawlerConfig, ExtractionConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Smallest pause allowed between two requests to the catalog site
const MIN_DELAY_FLOOR_MS: u64 = 100;

/// Upper bound for the request timeout
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_extraction_config(&config.extraction)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.start_urls.is_empty() {
        return Err(ConfigError::Validation(
            "start-urls must contain at least one listing page".to_string(),
        ));
    }

    for start_url in &config.start_urls {
        validate_start_url(start_url)?;
    }

    if config.min_delay_ms < MIN_DELAY_FLOOR_MS {
        return Err(ConfigError::Validation(format!(
            "min-delay-ms must be >= {}ms, got {}ms",
            MIN_DELAY_FLOOR_MS, config.min_delay_ms
        )));
    }

    if config.effective_max_delay_ms() < config.min_delay_ms {
        return Err(ConfigError::Validation(format!(
            "max-delay-ms ({}) must be >= min-delay-ms ({})",
            config.effective_max_delay_ms(),
            config.min_delay_ms
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates a single start URL: absolute, HTTP or HTTPS
fn validate_start_url(start_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(start_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", start_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Start URL '{}' must use HTTP or HTTPS",
            start_url
        )));
    }

    Ok(())
}

/// Validates the request identity
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.agents.is_empty() {
        return Err(ConfigError::Validation(
            "agents must contain at least one user-agent string".to_string(),
        ));
    }

    if config.agents.iter().any(|agent| agent.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "agents cannot contain blank entries".to_string(),
        ));
    }

    if config.accept_language.trim().is_empty() {
        return Err(ConfigError::Validation(
            "accept-language cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation("path cannot be empty".to_string()));
        }
    }

    if config.images_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "images-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the extraction marker words
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    let markers = [
        ("product-path-marker", &config.product_path_marker),
        ("advantages-heading", &config.advantages_heading),
        ("technical-info-heading", &config.technical_info_heading),
        ("brand-label", &config.brand_label),
    ];

    for (name, value) in markers {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}
