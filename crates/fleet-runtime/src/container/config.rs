//! # Fleet Configuration
//!
//! Runtime parameters, loaded from the environment with sane defaults.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `QF_SYSTEM_ID` | `MARK-BLU-SYSTEM-001` | Fleet identifier, part of every serial |
//! | `QF_NUM_AGENTS` | `40` | Agents in the roster |
//! | `QF_TIMESLOT_SECS` | `300` | Seconds between badge rotations |
//! | `QF_TIMESLOTS_TO_RUN` | `0` | Stop after this many rotations (0 = until Ctrl-C) |
//! | `QF_BADGE_HASH` | `sha3` | Badge hash: `sha3` or `blake3` |
//! | `QF_VERIFY_CONTENT_HASH` | `true` | Verifier checks the stored content hash |

use shared_crypto::HashAlgorithm;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default fleet identifier.
pub const DEFAULT_SYSTEM_ID: &str = "MARK-BLU-SYSTEM-001";

/// Complete fleet configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetConfig {
    /// Fleet identifier.
    pub system_id: String,
    /// Number of agents.
    pub num_agents: usize,
    /// Timeslot length in seconds.
    pub timeslot_secs: u64,
    /// Rotations before the runtime stops; 0 runs until interrupted.
    pub timeslots_to_run: u64,
    /// Badge hash name as configured (`sha3` or `blake3`).
    pub badge_hash: String,
    /// Whether the Verifier checks the content hash.
    pub verify_content_hash: bool,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            system_id: DEFAULT_SYSTEM_ID.to_string(),
            num_agents: 40,
            timeslot_secs: 300,
            timeslots_to_run: 0,
            badge_hash: "sha3".to_string(),
            verify_content_hash: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Fleet identifier is empty.
    #[error("QF_SYSTEM_ID must not be empty")]
    EmptySystemId,

    /// Roster would be empty.
    #[error("QF_NUM_AGENTS must be at least 1")]
    NoAgents,

    /// Rotation interval of zero.
    #[error("QF_TIMESLOT_SECS must be at least 1")]
    ZeroTimeslot,

    /// Unknown badge hash.
    #[error("Unknown badge hash '{0}' (expected sha3 or blake3)")]
    UnknownHash(String),

    /// A variable could not be parsed.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

impl FleetConfig {
    /// Load from the environment. Unset variables keep their defaults;
    /// unparseable values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(id) = lookup("QF_SYSTEM_ID") {
            config.system_id = id;
        }
        if let Some(v) = lookup("QF_NUM_AGENTS") {
            config.num_agents = parse_var("QF_NUM_AGENTS", v)?;
        }
        if let Some(v) = lookup("QF_TIMESLOT_SECS") {
            config.timeslot_secs = parse_var("QF_TIMESLOT_SECS", v)?;
        }
        if let Some(v) = lookup("QF_TIMESLOTS_TO_RUN") {
            config.timeslots_to_run = parse_var("QF_TIMESLOTS_TO_RUN", v)?;
        }
        if let Some(v) = lookup("QF_BADGE_HASH") {
            config.badge_hash = v;
        }
        if let Some(v) = lookup("QF_VERIFY_CONTENT_HASH") {
            config.verify_content_hash = match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "QF_VERIFY_CONTENT_HASH",
                        value: v,
                    })
                }
            };
        }

        Ok(config)
    }

    /// Reject configurations the runtime cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.system_id.trim().is_empty() {
            return Err(ConfigError::EmptySystemId);
        }
        if self.num_agents == 0 {
            return Err(ConfigError::NoAgents);
        }
        if self.timeslot_secs == 0 {
            return Err(ConfigError::ZeroTimeslot);
        }
        self.hash_algorithm()?;
        Ok(())
    }

    /// Parsed badge hash.
    pub fn hash_algorithm(&self) -> Result<HashAlgorithm, ConfigError> {
        self.badge_hash
            .parse()
            .map_err(|_| ConfigError::UnknownHash(self.badge_hash.clone()))
    }

    /// Rotation interval.
    pub fn timeslot_duration(&self) -> Duration {
        Duration::from_secs(self.timeslot_secs)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { var, value })
}
