//! Telemetry configuration from environment variables.

use std::env;
use tracing_subscriber::EnvFilter;

use crate::TelemetryError;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to startup logs
    pub service_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression)
    pub log_level: String,

    /// Whether to write logs to stdout at all
    pub console_output: bool,

    /// JSON lines instead of the pretty console format
    pub json_logs: bool,

    /// Whether to register the Prometheus collectors
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "quantum-fleet".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            metrics_enabled: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QF_SERVICE_NAME`: Service name (default: quantum-fleet)
    /// - `QF_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `QF_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `QF_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `QF_METRICS`: Register Prometheus metrics (default: true)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("QF_SERVICE_NAME")
                .unwrap_or_else(|_| "quantum-fleet".to_string()),

            log_level: env::var("QF_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("QF_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),

            json_logs: env::var("QF_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),

            metrics_enabled: env::var("QF_METRICS")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }

    /// Check the log filter parses and the service name is set.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.service_name.trim().is_empty() {
            return Err(TelemetryError::Config("service name is empty".into()));
        }
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| TelemetryError::Config(format!("log level '{}': {e}", self.log_level)))?;
        Ok(())
    }
}

/// `true`/`1`/`yes`/`on` (any case) are true; everything else is false.
pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
