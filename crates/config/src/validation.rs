//! Configuration validation

use crate::{AppConfig, ConfigError, Result};

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the entire application configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    // Validate API config
    if config.api.base_url.is_empty() {
        errors.push(ValidationError::new(
            "api.base_url",
            "base URL is required",
        ));
    } else if let Err(e) = validate_url(&config.api.base_url) {
        errors.push(ValidationError::new("api.base_url", e));
    }

    if config.api.timeout_ms == 0 {
        errors.push(ValidationError::new(
            "api.timeout_ms",
            "must be greater than 0",
        ));
    }

    // Validate checkout config
    if config.checkout.poll_interval_secs == 0 {
        errors.push(ValidationError::new(
            "checkout.poll_interval_secs",
            "must be greater than 0",
        ));
    }

    if config.checkout.poll_budget == 0 {
        errors.push(ValidationError::new(
            "checkout.poll_budget",
            "must be greater than 0",
        ));
    }

    // Validate reporting config
    if config.reporting.recent_payments == 0 {
        errors.push(ValidationError::new(
            "reporting.recent_payments",
            "must be greater than 0",
        ));
    }

    // Validate logging config
    if let Err(e) = validate_log_level(&config.logging.level) {
        errors.push(e);
    }

    // Return all errors if any were found
    if !errors.is_empty() {
        let error_msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ConfigError::ValidationError(error_msg));
    }

    Ok(())
}

/// Validate a URL
pub fn validate_url(url: &str) -> std::result::Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    // Basic URL validation - check for scheme
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    Ok(())
}

/// Validate log level
fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new(
            "logging.level",
            format!(
                "invalid log level '{level}', must be one of: trace, debug, info, warn, error"
            ),
        )),
    }
}

impl AppConfig {
    /// Validate this configuration, reporting every violation at once
    pub fn validate(&self) -> Result<()> {
        validate_config(self)
    }
}
