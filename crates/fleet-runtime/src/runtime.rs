//! # Fleet Runtime
//!
//! Drives badge rotation on a fixed interval and exercises the channel
//! with a small amount of patrol traffic each timeslot.
//!
//! ## Rotation Loop
//!
//! ```text
//! interval tick ──→ advance_timeslot() ──→ patrol() ──→ wait
//!      ↑                                                  │
//!      └──────────── until timeslots_to_run or shutdown ──┘
//! ```

use std::sync::Arc;

use qf_01_fleet_identity::{AdvanceReport, FleetIdentityApi, FleetStatus, IdentityStore};
use qf_03_communication_audit::CommunicationAuditApi;
use quantum_telemetry::{
    log_timeslot_event, metric_inc, subsystem_span, time_histogram, ADVANCE_DURATION,
    BADGES_GENERATED, CURRENT_TIMESLOT, DUPLICATE_IDENTITIES, SUBSYSTEM_ERRORS, TIMESLOTS_ADVANCED,
};
use rand::seq::index::sample;
use serde::Serialize;
use shared_types::StoreStats;
use tokio::sync::watch;
use tracing::{error, info, Instrument};

use crate::container::{FleetConfig, FleetContainer};
use crate::errors::RuntimeResult;
use crate::messaging::{ExchangeReport, FleetMessenger};

/// Aggregate identity and communication counts.
pub type FleetStats = StoreStats;

/// Traffic generated in one patrol round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatrolReport {
    pub exchange: ExchangeReport,
    /// Whether a third agent recovered the status message; `None` when the
    /// fleet has fewer than three agents.
    pub interception_breach: Option<bool>,
}

/// The fleet runtime orchestrating all subsystems.
pub struct FleetRuntime {
    container: Arc<FleetContainer>,
    messenger: FleetMessenger,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl FleetRuntime {
    /// Validate the config and wire in-memory subsystems.
    pub fn new(config: FleetConfig) -> RuntimeResult<Self> {
        Ok(Self::from_container(FleetContainer::new(config)?))
    }

    /// Runtime over an already wired container.
    pub fn from_container(container: FleetContainer) -> Self {
        let messenger = FleetMessenger::new(&container);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            messenger,
            shutdown_tx,
            shutdown_rx,
        }
    }

    pub fn container(&self) -> Arc<FleetContainer> {
        Arc::clone(&self.container)
    }

    pub fn messenger(&self) -> &FleetMessenger {
        &self.messenger
    }

    /// Advance the fleet one timeslot and record metrics.
    pub async fn advance_timeslot(&self) -> RuntimeResult<AdvanceReport> {
        let _timer = time_histogram!(ADVANCE_DURATION);
        let result = self
            .container
            .identity
            .advance()
            .instrument(subsystem_span!("advance_timeslot", subsystem = "qf-01"))
            .await;

        metric_inc!(TIMESLOTS_ADVANCED);
        CURRENT_TIMESLOT.set(self.container.identity.clock().current().value() as f64);

        match result {
            Ok(report) => {
                BADGES_GENERATED.inc_by(report.generated as f64);
                DUPLICATE_IDENTITIES.inc_by(report.duplicates as f64);
                Ok(report)
            }
            Err(e) => {
                metric_inc!(SUBSYSTEM_ERRORS, &["qf-01", "advance"]);
                Err(e.into())
            }
        }
    }

    pub fn status(&self) -> FleetStatus {
        self.container.identity.status()
    }

    /// Store-wide statistics.
    pub async fn stats(&self) -> RuntimeResult<FleetStats> {
        let identities = &self.container.identity_store;
        Ok(FleetStats {
            total_identities: identities.count().await?,
            unique_agents: identities.unique_agents().await?,
            total_communications: self.container.audit.count().await?,
            max_timeslot: identities.max_timeslot().await?,
        })
    }

    /// One peer-to-peer exchange between two random agents, plus an
    /// interception attempt by a third when the fleet is large enough.
    pub async fn patrol(&self) -> RuntimeResult<Option<PatrolReport>> {
        let roster = self.container.identity.roster();
        if roster.len() < 2 {
            return Ok(None);
        }

        let picks = {
            let mut rng = rand::thread_rng();
            sample(&mut rng, roster.len(), roster.len().min(3)).into_vec()
        };
        let first = &roster[picks[0]];
        let second = &roster[picks[1]];

        let exchange = self.messenger.peer_to_peer_exchange(first, second).await?;

        let interception_breach = match picks.get(2) {
            Some(&i) => {
                let captured = self.container.audit.get(exchange.status).await?;
                let outcome = self.messenger.intercept(&captured.record, &roster[i]).await?;
                Some(outcome.is_breach())
            }
            None => None,
        };

        Ok(Some(PatrolReport {
            exchange,
            interception_breach,
        }))
    }

    /// Rotate badges until the configured number of timeslots has run or
    /// shutdown is signalled. Returns the number of rotations attempted.
    pub async fn run(&self) -> u64 {
        let config = &self.container.config;
        let mut interval = tokio::time::interval(config.timeslot_duration());
        let mut shutdown = self.shutdown_rx.clone();
        let mut rotations = 0u64;

        info!(
            system_id = %config.system_id,
            agents = config.num_agents,
            timeslot_secs = config.timeslot_secs,
            "[fleet] rotation loop started"
        );

        loop {
            if config.timeslots_to_run > 0 && rotations >= config.timeslots_to_run {
                break;
            }

            tokio::select! {
                _ = interval.tick() => {}
                _ = shutdown.changed() => {
                    info!("[fleet] Shutdown signal received");
                    break;
                }
            }

            rotations += 1;
            match self.advance_timeslot().await {
                Ok(report) => {
                    if let Err(e) = self.patrol().await {
                        log_timeslot_event!(
                            error,
                            "fleet-runtime",
                            "[fleet] patrol failed",
                            report.timeslot,
                            error = %e
                        );
                    }
                }
                Err(e) => error!(error = %e, "[fleet] timeslot advance failed"),
            }
        }

        rotations
    }

    /// Signal the rotation loop to stop.
    pub fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
    }
}
