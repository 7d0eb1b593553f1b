//! # Quantum-Fleet Runtime
//!
//! Entry point for a fleet of agents with rotating badge identities.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (`QF_LOG_LEVEL`, `QF_JSON_LOGS`, `QF_METRICS`)
//! 2. Load and validate fleet configuration (`QF_*` variables)
//! 3. Wire subsystems in dependency order
//! 4. Rotate badges every timeslot until the configured count or Ctrl+C
//! 5. Print the final status and statistics as JSON

use std::sync::Arc;

use anyhow::{Context, Result};
use fleet_runtime::{FleetConfig, FleetRuntime};
use quantum_telemetry::{encode_metrics, init_telemetry, log_event, TelemetryConfig};
use serde_json::json;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry_config = TelemetryConfig::from_env();
    let metrics_enabled = telemetry_config.metrics_enabled;
    let _telemetry = init_telemetry(telemetry_config).context("telemetry init failed")?;

    let config = FleetConfig::from_env().context("invalid fleet configuration")?;
    config.validate().context("invalid fleet configuration")?;

    info!(
        system_id = %config.system_id,
        agents = config.num_agents,
        timeslot_secs = config.timeslot_secs,
        timeslots_to_run = config.timeslots_to_run,
        "Starting Quantum-Fleet runtime"
    );

    let runtime = Arc::new(FleetRuntime::new(config)?);

    let signal_runtime = Arc::clone(&runtime);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal_runtime.shutdown(),
            Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    info!("Fleet is running. Press Ctrl+C to stop.");
    let rotations = runtime.run().await;

    let stats = runtime.stats().await?;
    let summary = json!({
        "rotations": rotations,
        "status": runtime.status(),
        "stats": stats,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if metrics_enabled {
        match encode_metrics() {
            Ok(text) => println!("{text}"),
            Err(e) => warn!("Failed to encode metrics: {}", e),
        }
    }

    log_event!(info, "fleet-runtime", "Quantum-Fleet runtime stopped", rotations = rotations);
    Ok(())
}
