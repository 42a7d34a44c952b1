//! Core configuration structures for the rentflow services

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(Default)]
pub struct AppConfig {
    /// Property API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Checkout and status-poll behaviour
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Dashboard reporting settings
    #[serde(default)]
    pub reporting: ReportingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Property API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the property management API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum retry attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Checkout and status-poll configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Seconds between gateway status polls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Maximum number of status polls per attempt
    #[serde(default = "default_poll_budget")]
    pub poll_budget: u32,
}

/// Dashboard reporting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Number of recent payments shown on the dashboard
    #[serde(default = "default_recent_payments")]
    pub recent_payments: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON
    #[serde(default)]
    pub json: bool,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_ms() -> u64 {
    30000
}

fn default_max_retries() -> u32 {
    3
}

fn default_poll_interval_secs() -> u64 {
    3
}

fn default_poll_budget() -> u32 {
    10
}

fn default_recent_payments() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            poll_budget: default_poll_budget(),
        }
    }
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            recent_payments: default_recent_payments(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
