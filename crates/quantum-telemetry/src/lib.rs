//! # Quantum Telemetry
//!
//! Logging and metrics for Quantum-Fleet.
//!
//! ## Components
//!
//! - **Logs**: `tracing` subscriber with `EnvFilter`, pretty or JSON output
//! - **Metrics**: Prometheus collectors in a private registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QF_SERVICE_NAME` | `quantum-fleet` | Service name in startup logs |
//! | `QF_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `QF_JSON_LOGS` | `false` | JSON lines instead of pretty output |
//! | `QF_METRICS` | `true` | Register Prometheus collectors |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingHandle};
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, ADVANCE_DURATION, BADGES_GENERATED,
    COMMUNICATIONS_LOGGED, CURRENT_TIMESLOT, DUPLICATE_IDENTITIES, INTERCEPTIONS, MESSAGES_SENT,
    SUBSYSTEM_ERRORS, TIMESLOTS_ADVANCED, VERIFICATIONS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    config.validate()?;

    let metrics = if config.metrics_enabled {
        Some(register_metrics()?)
    } else {
        None
    };

    let logging = init_logging(&config)?;

    Ok(TelemetryGuard {
        _logging: logging,
        _metrics: metrics,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _logging: LoggingHandle,
    _metrics: Option<MetricsHandle>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Convenience macro for creating a span with subsystem context.
///
/// # Example
///
/// ```rust,ignore
/// use quantum_telemetry::subsystem_span;
///
/// fn advance() {
///     let _span = subsystem_span!("advance", subsystem = "fleet-identity", timeslot = 12);
/// }
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected_before_install() {
        let config = TelemetryConfig {
            service_name: String::new(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(
            init_telemetry(config),
            Err(TelemetryError::Config(_))
        ));
    }

    #[test]
    fn test_metric_inc_macro() {
        let before = MESSAGES_SENT.with_label_values(&["success"]).get();
        metric_inc!(MESSAGES_SENT, &["success"]);
        assert!(MESSAGES_SENT.with_label_values(&["success"]).get() >= before + 1.0);
    }
}
