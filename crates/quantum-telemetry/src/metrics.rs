//! Prometheus metrics for Quantum-Fleet subsystems.
//!
//! All metrics follow the naming convention: `qf_<subsystem>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., badges_generated_total)
//! - **Gauge**: Value that can go up or down (e.g., current_timeslot)
//! - **Histogram**: Distribution of values (e.g., advance_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // FLEET IDENTITY METRICS (Subsystem 1)
    // =========================================================================

    /// Timeslots issued by the fleet clock
    pub static ref TIMESLOTS_ADVANCED: Counter = Counter::new(
        "qf_identity_timeslots_advanced_total",
        "Total number of timeslots issued by the fleet clock"
    ).expect("metric creation failed");

    /// Last issued timeslot
    pub static ref CURRENT_TIMESLOT: Gauge = Gauge::new(
        "qf_identity_current_timeslot",
        "Current fleet timeslot"
    ).expect("metric creation failed");

    /// Badges generated
    pub static ref BADGES_GENERATED: Counter = Counter::new(
        "qf_identity_badges_generated_total",
        "Total number of badges generated"
    ).expect("metric creation failed");

    /// Identities skipped because they already existed
    pub static ref DUPLICATE_IDENTITIES: Counter = Counter::new(
        "qf_identity_duplicates_total",
        "Identities rejected as duplicate (serial, timeslot)"
    ).expect("metric creation failed");

    /// Time to generate and persist one timeslot for the whole fleet
    pub static ref ADVANCE_DURATION: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "qf_identity_advance_duration_seconds",
            "Time spent advancing the fleet to a new timeslot"
        ).buckets(exponential_buckets(0.0001, 2.0, 15).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // SECURE CHANNEL METRICS (Subsystem 2)
    // =========================================================================

    /// Messages sent between agents
    pub static ref MESSAGES_SENT: CounterVec = CounterVec::new(
        Opts::new("qf_channel_messages_sent_total", "Messages sent between agents"),
        &["outcome"]  // outcome: success/failed
    ).expect("metric creation failed");

    /// Interception replays
    pub static ref INTERCEPTIONS: CounterVec = CounterVec::new(
        Opts::new("qf_channel_interceptions_total", "Interception replay attempts"),
        &["outcome"]  // outcome: blocked/false-accept/recovered
    ).expect("metric creation failed");

    // =========================================================================
    // COMMUNICATION AUDIT METRICS (Subsystem 3)
    // =========================================================================

    /// Records appended to the communication log
    pub static ref COMMUNICATIONS_LOGGED: Counter = Counter::new(
        "qf_audit_communications_logged_total",
        "Total communications appended to the audit log"
    ).expect("metric creation failed");

    /// Verifications by outcome
    pub static ref VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("qf_audit_verifications_total", "Replay verifications by outcome"),
        &["outcome"]  // verified/badge-not-found/decrypt-failed/hash-mismatch
    ).expect("metric creation failed");

    // =========================================================================
    // ERROR METRICS
    // =========================================================================

    /// Subsystem errors by type
    pub static ref SUBSYSTEM_ERRORS: CounterVec = CounterVec::new(
        Opts::new("qf_subsystem_errors_total", "Errors by subsystem and type"),
        &["subsystem", "error_type"]
    ).expect("metric creation failed");
}

/// Handle returned once the collectors are registered.
#[derive(Debug)]
pub struct MetricsHandle {
    registered: usize,
}

impl MetricsHandle {
    /// Number of collectors in the registry.
    pub fn registered(&self) -> usize {
        self.registered
    }
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already registered collectors are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Identity
        Box::new(TIMESLOTS_ADVANCED.clone()),
        Box::new(CURRENT_TIMESLOT.clone()),
        Box::new(BADGES_GENERATED.clone()),
        Box::new(DUPLICATE_IDENTITIES.clone()),
        Box::new(ADVANCE_DURATION.clone()),
        // Channel
        Box::new(MESSAGES_SENT.clone()),
        Box::new(INTERCEPTIONS.clone()),
        // Audit
        Box::new(COMMUNICATIONS_LOGGED.clone()),
        Box::new(VERIFICATIONS.clone()),
        // Errors
        Box::new(SUBSYSTEM_ERRORS.clone()),
    ];
    let registered = metrics.len();

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { registered })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
