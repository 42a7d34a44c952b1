use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fallback filter directive when RUST_LOG is not set
const DEFAULT_FILTER: &str = "info,rentflow=debug";

/// Initialize tracing with the default filter and a plain text formatter
pub fn init_tracing() -> Result<(), TelemetryError> {
    init_tracing_with(DEFAULT_FILTER, false)
}

/// Initialize tracing with a fallback filter directive and output format
///
/// RUST_LOG takes precedence over `default_filter` when set. With `json`
/// enabled, events are emitted as one JSON object per line.
pub fn init_tracing_with(default_filter: &str, json: bool) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if json {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .json();
        registry.with(fmt_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true);
        registry.with(fmt_layer).try_init()
    };

    result.map_err(|e| TelemetryError::InitError(e.to_string()))
}

/// Correlation ID for tracking requests across components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(uuid::Uuid);

impl CorrelationId {
    /// Generate a new correlation ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Get the correlation ID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span context for checkout flow tracking
#[derive(Debug, Clone)]
pub struct CheckoutSpan {
    pub correlation_id: CorrelationId,
    pub attempt_id: String,
    pub lease_id: String,
}

impl CheckoutSpan {
    pub fn new(attempt_id: String, lease_id: String) -> Self {
        Self {
            correlation_id: CorrelationId::new(),
            attempt_id,
            lease_id,
        }
    }

    /// Enter a tracing span for this checkout attempt
    pub fn enter(&self) -> tracing::span::EnteredSpan {
        tracing::info_span!(
            "checkout",
            correlation_id = %self.correlation_id,
            attempt_id = %self.attempt_id,
            lease_id = %self.lease_id,
        )
        .entered()
    }
}

/// Error enrichment for adding context to errors
pub trait ErrorContext {
    /// Add correlation ID context to an error
    fn with_correlation_id(self, correlation_id: CorrelationId) -> Self;

    /// Add attempt ID context to an error
    fn with_attempt_id(self, attempt_id: &str) -> Self;

    /// Add lease ID context to an error
    fn with_lease_id(self, lease_id: &str) -> Self;
}

impl<T, E> ErrorContext for Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_correlation_id(self, correlation_id: CorrelationId) -> Self {
        self.map_err(|e| {
            tracing::error!(
                correlation_id = %correlation_id,
                error = %e,
                "error occurred"
            );
            e
        })
    }

    fn with_attempt_id(self, attempt_id: &str) -> Self {
        self.map_err(|e| {
            tracing::error!(
                attempt_id = %attempt_id,
                error = %e,
                "error occurred"
            );
            e
        })
    }

    fn with_lease_id(self, lease_id: &str) -> Self {
        self.map_err(|e| {
            tracing::error!(
                lease_id = %lease_id,
                error = %e,
                "error occurred"
            );
            e
        })
    }
}

/// Telemetry error types
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("tracing initialization error: {0}")]
    InitError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_id_generation() {
        let id1 = CorrelationId::new();
        let id2 = CorrelationId::new();

        // IDs should be unique
        assert_ne!(id1, id2);

        // Should be valid UUID format
        assert!(id1.as_str().len() == 36);
    }

    #[test]
    fn test_checkout_span_creation() {
        let span = CheckoutSpan::new("attempt_123".to_string(), "42".to_string());

        assert_eq!(span.attempt_id, "attempt_123");
        assert_eq!(span.lease_id, "42");
    }

    #[test]
    fn test_error_context_passthrough() {
        let ok: Result<u32, String> = Ok(7);
        assert_eq!(ok.with_lease_id("42").unwrap(), 7);

        let err: Result<u32, String> = Err("gateway unreachable".to_string());
        let id = CorrelationId::new();
        assert_eq!(err.with_correlation_id(id).unwrap_err(), "gateway unreachable");
    }
}
