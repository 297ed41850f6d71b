//! Garage door controller.
//!
//! Owns the sensor port, the debouncer, the obstruction monitor and the
//! actuator for one door. Pin acquisition happens once at construction; if
//! the configuration is invalid or any pin fails, the controller stays
//! inert and every poll or command is a logged no-op.

use crate::actuator::{Actuator, CommandOutcome, SharedPort};
use crate::debouncer::{Debounced, Debouncer, SensorHistory};
use crate::obstruction::ObstructionMonitor;
use garage_common::door::config::DoorConfig;
use garage_common::door::types::{ContactState, ControllerState, DoorState, RawSample, StateRecord};
use garage_hal::{HalError, SensorPort};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Controller for a single garage door.
pub struct GarageDoorController {
    name: String,
    initialized: bool,
    port: SharedPort,
    debouncer: Debouncer,
    monitor: ObstructionMonitor,
    actuator: Actuator,
}

impl GarageDoorController {
    /// Validate `config` and acquire the pins of `port`.
    ///
    /// Never fails: on error the controller is returned uninitialized.
    pub fn new(config: &DoorConfig, mut port: Box<dyn SensorPort>) -> Self {
        let acquired = config
            .validate()
            .map_err(|e| HalError::ConfigError(e.to_string()))
            .and_then(|()| port.init(config));

        let initialized = match acquired {
            Ok(()) => {
                info!(
                    "{}: controller initialized on '{}' port (pulse {}ms)",
                    config.name,
                    port.name(),
                    config.openclose_timeout_ms
                );
                true
            }
            Err(e) => {
                error!("{}: Initialization failed! {}", config.name, e);
                false
            }
        };

        let port: SharedPort = Arc::new(Mutex::new(port));
        let actuator = Actuator::new(Arc::clone(&port), config.pulse_duration());

        Self {
            name: config.name.clone(),
            initialized,
            port,
            debouncer: Debouncer::new(),
            monitor: ObstructionMonitor::new(),
            actuator,
        }
    }

    /// Door name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hardware acquisition at construction succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Obstruction flag from the last defined state.
    pub fn current_obstruction(&self) -> bool {
        self.monitor.obstruction()
    }

    /// Last defined door state. No hardware read.
    pub fn current_door_state(&self) -> DoorState {
        self.monitor.last_door_state()
    }

    /// Snapshot of the controller state.
    pub fn state(&self) -> ControllerState {
        ControllerState {
            last_door_state: self.monitor.last_door_state(),
            obstruction: self.monitor.obstruction(),
            ..ControllerState::new(self.initialized)
        }
    }

    /// Debouncer history (previous sample).
    pub fn history(&self) -> SensorHistory {
        self.debouncer.history()
    }

    /// A relay pulse is in flight.
    pub fn is_pulsing(&self) -> bool {
        self.actuator.is_pulsing()
    }

    /// Read the sensors and run them through the pipeline.
    ///
    /// Returns the new record when the door state changed, `None` when
    /// nothing changed, the transition is undecodable, the read failed or
    /// the controller is not initialized.
    pub fn poll(&mut self) -> Option<StateRecord> {
        if !self.initialized {
            debug!("{}: poll ignored, controller not initialized", self.name);
            return None;
        }

        let sample = match self.port.lock().read_sample() {
            Ok(sample) => sample,
            Err(e) => {
                warn!("{}: sensor read failed: {}", self.name, e);
                return None;
            }
        };
        self.process_sample(sample)
    }

    /// Run an externally obtained sample through the pipeline.
    pub fn process_sample(&mut self, sample: RawSample) -> Option<StateRecord> {
        if !self.initialized {
            return None;
        }

        match self.debouncer.feed(sample) {
            Debounced::Changed(record) => {
                info!("{}: Door is {}", self.name, record.label);
                self.monitor.observe(record.door_state);
                Some(record)
            }
            Debounced::Undecodable => {
                debug!("{}: change detected, no defined state", self.name);
                None
            }
            Debounced::Steady => None,
        }
    }

    /// Toggle the door unless it is between end positions.
    pub fn open(&mut self) -> CommandOutcome {
        if !self.initialized {
            debug!("{}: open ignored, controller not initialized", self.name);
            return CommandOutcome::NotInitialized;
        }

        match self.live_sample() {
            Some(sample) if sample.in_motion() => {
                info!("{}: Garage door is in motion! Ignoring!", self.name);
                CommandOutcome::InMotion
            }
            Some(_) => self.actuator.pulse(),
            None => CommandOutcome::IoFailed,
        }
    }

    /// Pulse the relay regardless of the sensed state (manual stop/override).
    pub fn force_open(&mut self) -> CommandOutcome {
        if !self.initialized {
            debug!("{}: force open ignored, controller not initialized", self.name);
            return CommandOutcome::NotInitialized;
        }
        info!("{}: Firing garage door", self.name);
        self.actuator.pulse()
    }

    /// Pulse the relay unless the door already reads closed.
    pub fn close(&mut self) -> CommandOutcome {
        if !self.initialized {
            debug!("{}: close ignored, controller not initialized", self.name);
            return CommandOutcome::NotInitialized;
        }

        match self.live_sample() {
            Some(sample) if sample.close_active => {
                info!("{}: Door closed. Ignoring request", self.name);
                CommandOutcome::AlreadyClosed
            }
            Some(_) => {
                info!("{}: Door not fully closed. Operating relay", self.name);
                self.actuator.pulse()
            }
            None => CommandOutcome::IoFailed,
        }
    }

    /// Live open sensor reading.
    pub fn open_contact(&self) -> Option<ContactState> {
        self.live_sample().map(|s| ContactState::from(s.open_active))
    }

    /// Live close sensor reading.
    pub fn close_contact(&self) -> Option<ContactState> {
        self.live_sample().map(|s| ContactState::from(s.close_active))
    }

    /// Live motion check: neither sensor contacted.
    pub fn motion_detected(&self) -> Option<bool> {
        self.live_sample().map(|s| s.in_motion())
    }

    /// Block until an in-flight pulse has restored the relay.
    pub fn wait_for_pulse(&mut self) {
        self.actuator.wait_idle();
    }

    /// Cancel any in-flight pulse (relay restored idle) and release the pins.
    ///
    /// The controller is inert afterwards.
    pub fn shutdown(&mut self) {
        self.actuator.cancel();
        if !self.initialized {
            return;
        }
        self.initialized = false;
        match self.port.lock().shutdown() {
            Ok(()) => info!("{}: controller shut down", self.name),
            Err(e) => warn!("{}: port shutdown failed: {}", self.name, e),
        }
    }

    /// Fresh hardware read that leaves the debouncer history untouched.
    fn live_sample(&self) -> Option<RawSample> {
        if !self.initialized {
            return None;
        }
        match self.port.lock().read_sample() {
            Ok(sample) => Some(sample),
            Err(e) => {
                warn!("{}: sensor read failed: {}", self.name, e);
                None
            }
        }
    }
}

impl Drop for GarageDoorController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
