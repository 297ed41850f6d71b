//! Level-change debouncer.
//!
//! Remembers the previous raw sample and only translates when a sensor
//! level actually changed. The history always advances to the new sample,
//! so an undecodable transition is absorbed rather than retried.

use crate::translator::translate;
use garage_common::door::types::{RawSample, StateRecord};
use tracing::{debug, warn};

/// Previous raw sample, owned by the [`Debouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorHistory {
    /// Open sensor level at the previous change.
    pub prev_open_active: bool,
    /// Close sensor level at the previous change.
    pub prev_close_active: bool,
}

/// Outcome of feeding one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Debounced {
    /// Neither level changed.
    Steady,
    /// A level changed but the transition has no table entry.
    Undecodable,
    /// A level changed into a defined state.
    Changed(StateRecord),
}

/// Sensor level-edge detector.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    history: SensorHistory,
}

impl Debouncer {
    /// Debouncer with both previous levels inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current history.
    pub fn history(&self) -> SensorHistory {
        self.history
    }

    /// Feed one sample.
    pub fn feed(&mut self, sample: RawSample) -> Debounced {
        let prev = self.history;
        let open_changed = sample.open_active != prev.prev_open_active;
        let close_changed = sample.close_active != prev.prev_close_active;

        if !open_changed && !close_changed {
            return Debounced::Steady;
        }

        if open_changed {
            debug!("Open state change = {}", sample.open_active);
        }
        if close_changed {
            debug!("Close state change = {}", sample.close_active);
        }

        let translated = translate(
            sample.open_active,
            sample.close_active,
            prev.prev_open_active,
            prev.prev_close_active,
        );

        self.history = SensorHistory {
            prev_open_active: sample.open_active,
            prev_close_active: sample.close_active,
        };

        match translated {
            Some(record) => Debounced::Changed(record),
            None if sample.is_invalid() => {
                warn!("Both door sensors contacted, check wiring");
                Debounced::Undecodable
            }
            None => {
                debug!(
                    "No transition for ({}, {}) after ({}, {})",
                    sample.open_active,
                    sample.close_active,
                    prev.prev_open_active,
                    prev.prev_close_active
                );
                Debounced::Undecodable
            }
        }
    }
}
