//! # Fleet Clock
//!
//! Owns the single global timeslot counter.
//!
//! ## Invariants
//!
//! - `advance()` is linearizable: callers are serialized on one mutex and
//!   no two callers ever observe the same resulting value.
//! - A consumed timeslot is never reissued, even if identity generation for
//!   it fails afterwards.
//! - The established timeslot never moves backwards and never exceeds the
//!   current one.

use parking_lot::Mutex;
use shared_types::Timeslot;

use super::errors::{IdentityError, IdentityResult};

/// Snapshot of the fleet-wide clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FleetState {
    /// Last issued timeslot.
    pub current: Timeslot,
    /// Last timeslot whose identities were all generated and persisted.
    pub established: Option<Timeslot>,
}

/// Linearizable timeslot counter.
#[derive(Debug, Default)]
pub struct FleetClock {
    state: Mutex<FleetState>,
}

impl FleetClock {
    /// Clock at the genesis timeslot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a clock from a persisted high-water mark.
    ///
    /// Everything up to `timeslot` is treated as established.
    pub fn starting_at(timeslot: Timeslot) -> Self {
        let established = (timeslot > Timeslot::GENESIS).then_some(timeslot);
        Self {
            state: Mutex::new(FleetState {
                current: timeslot,
                established,
            }),
        }
    }

    /// Increment the counter by exactly one and return the new value.
    pub fn advance(&self) -> IdentityResult<Timeslot> {
        let mut state = self.state.lock();
        let next = state
            .current
            .checked_next()
            .ok_or(IdentityError::TimeslotExhausted)?;
        state.current = next;
        Ok(next)
    }

    /// Last issued timeslot.
    pub fn current(&self) -> Timeslot {
        self.state.lock().current
    }

    /// Last established timeslot, if any.
    pub fn established(&self) -> Option<Timeslot> {
        self.state.lock().established
    }

    /// Mark `timeslot` as established once its identity barrier completed.
    pub fn establish(&self, timeslot: Timeslot) -> IdentityResult<()> {
        let mut state = self.state.lock();
        if timeslot > state.current {
            return Err(IdentityError::TimeslotNotIssued {
                timeslot,
                current: state.current,
            });
        }
        if state.established.map_or(true, |e| timeslot > e) {
            state.established = Some(timeslot);
        }
        Ok(())
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> FleetState {
        *self.state.lock()
    }
}
