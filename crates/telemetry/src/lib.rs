//! Telemetry for the rentflow services
//!
//! This crate wires up structured logging for the dashboard and checkout
//! flows:
//!
//! - Env-filterable `tracing` subscriber with optional JSON output
//! - Correlation IDs for tracking a request across components
//! - Span helpers for checkout flow tracking
//! - Error context enrichment

pub mod tracing;

pub use self::tracing::{
    init_tracing, init_tracing_with, CheckoutSpan, CorrelationId, ErrorContext, TelemetryError,
};
