//! Simulated sensor port.
//!
//! Holds raw pin levels exactly as the GPIO port would see them, so the
//! configured wiring and relay polarity are exercised end to end. State is
//! shared with a cloneable [`SimHandle`] for tests and mock mode.

use super::travel::{DoorTravel, Sensor};
use crate::port::{HalError, SensorPort};
use garage_common::consts::bcm_for_physical;
use garage_common::door::config::{DoorConfig, RelayActiveLevel, SensorWiring};
use garage_common::door::types::RawSample;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Shared simulation state.
#[derive(Debug)]
struct SimState {
    wiring: SensorWiring,
    relay_polarity: RelayActiveLevel,
    /// Raw open sensor level (true = high)
    open_level: bool,
    /// Raw close sensor level (true = high)
    close_level: bool,
    /// Raw relay output level (true = high)
    relay_level: bool,
    /// Pins acquired by `init()`
    acquired: bool,
    /// Pins that refuse acquisition
    failing_pins: Vec<u8>,
    /// Sensor reads fail while set
    read_fault: bool,
    /// Number of idle → active relay edges
    activations: u32,
    /// Door movement model, if enabled
    travel: Option<DoorTravel>,
}

impl SimState {
    fn contacts(&self) -> RawSample {
        RawSample::new(
            self.wiring.contacted(self.open_level),
            self.wiring.contacted(self.close_level),
        )
    }

    fn set_contact(&mut self, sensor: Sensor, contacted: bool) {
        let level = self.wiring.level_for(contacted);
        match sensor {
            Sensor::Open => self.open_level = level,
            Sensor::Close => self.close_level = level,
        }
    }

    fn relay_active(&self) -> bool {
        self.relay_level == self.relay_polarity.level_for(true)
    }

    fn advance(&mut self, now: Instant) {
        let changes = match self.travel.as_mut() {
            Some(travel) => travel.due(now),
            None => return,
        };
        for (sensor, contacted) in changes {
            debug!("Simulated {:?} sensor -> {}", sensor, contacted);
            self.set_contact(sensor, contacted);
        }
    }
}

/// Cloneable handle onto a [`SimulatedPort`]'s pins.
#[derive(Debug, Clone)]
pub struct SimHandle {
    state: Arc<Mutex<SimState>>,
}

impl SimHandle {
    /// Set both reed switches (logical contacted values).
    pub fn set_contacts(&self, open: bool, close: bool) {
        let mut state = self.state.lock();
        state.set_contact(Sensor::Open, open);
        state.set_contact(Sensor::Close, close);
    }

    /// Current logical contacts.
    pub fn contacts(&self) -> RawSample {
        self.state.lock().contacts()
    }

    /// Raw (open, close) sensor levels, true = high.
    pub fn sensor_levels(&self) -> (bool, bool) {
        let state = self.state.lock();
        (state.open_level, state.close_level)
    }

    /// Relay currently energized.
    pub fn relay_active(&self) -> bool {
        self.state.lock().relay_active()
    }

    /// Raw relay output level, true = high.
    pub fn relay_level(&self) -> bool {
        self.state.lock().relay_level
    }

    /// Number of relay activations (idle → active edges).
    pub fn activation_count(&self) -> u32 {
        self.state.lock().activations
    }

    /// Make a physical pin refuse acquisition.
    pub fn fail_pin(&self, pin: u8) {
        self.state.lock().failing_pins.push(pin);
    }

    /// Make sensor reads fail until cleared.
    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().read_fault = fail;
    }

    /// All pins acquired.
    pub fn is_acquired(&self) -> bool {
        self.state.lock().acquired
    }

    /// Reverse a closing door back to open, as its safety sensor would.
    pub fn safety_reverse(&self) -> bool {
        let mut state = self.state.lock();
        match state.travel.as_mut() {
            Some(travel) => travel.safety_reverse(Instant::now()),
            None => false,
        }
    }
}

/// Simulated door pins.
///
/// Starts with the door closed: close switch contacted, relay idle.
pub struct SimulatedPort {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedPort {
    /// Create a simulated port using the wiring and travel settings of `config`.
    pub fn new(config: &DoorConfig) -> Self {
        let wiring = config.sensor_wiring;
        let relay_polarity = config.relay_active;
        let travel = (config.sim_travel_ms > 0)
            .then(|| DoorTravel::new(Duration::from_millis(config.sim_travel_ms)));

        let state = SimState {
            wiring,
            relay_polarity,
            open_level: wiring.level_for(false),
            close_level: wiring.level_for(true),
            relay_level: relay_polarity.idle_level(),
            acquired: false,
            failing_pins: Vec::new(),
            read_fault: false,
            activations: 0,
            travel,
        };

        debug!(
            "SimulatedPort created: wiring={:?}, relay={:?}, travel={}ms",
            wiring, relay_polarity, config.sim_travel_ms
        );

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Handle sharing this port's state.
    pub fn handle(&self) -> SimHandle {
        SimHandle {
            state: Arc::clone(&self.state),
        }
    }

    fn ensure_acquired(state: &SimState) -> Result<(), HalError> {
        if state.acquired {
            Ok(())
        } else {
            Err(HalError::InitFailed("simulated pins not acquired".to_string()))
        }
    }

    fn ensure_readable(state: &SimState) -> Result<(), HalError> {
        Self::ensure_acquired(state)?;
        if state.read_fault {
            return Err(HalError::CommunicationError(
                "simulated sensor read fault".to_string(),
            ));
        }
        Ok(())
    }
}

impl SensorPort for SimulatedPort {
    fn name(&self) -> &'static str {
        super::PORT_NAME
    }

    fn init(&mut self, config: &DoorConfig) -> Result<(), HalError> {
        let mut state = self.state.lock();
        for (key, pin) in config.pins() {
            if bcm_for_physical(pin).is_none() {
                return Err(HalError::PinUnavailable {
                    pin,
                    reason: format!("{key} is not a GPIO header position"),
                });
            }
            if state.failing_pins.contains(&pin) {
                return Err(HalError::PinUnavailable {
                    pin,
                    reason: format!("{key} refused by simulation"),
                });
            }
        }

        state.relay_level = state.relay_polarity.idle_level();
        state.acquired = true;
        info!(
            "Simulated pins acquired (open={}, close={}, relay={})",
            config.open_pin, config.close_pin, config.relay_pin
        );
        Ok(())
    }

    fn read_open_sensor(&mut self) -> Result<bool, HalError> {
        let mut state = self.state.lock();
        Self::ensure_readable(&state)?;
        state.advance(Instant::now());
        Ok(state.wiring.contacted(state.open_level))
    }

    fn read_close_sensor(&mut self) -> Result<bool, HalError> {
        let mut state = self.state.lock();
        Self::ensure_readable(&state)?;
        state.advance(Instant::now());
        Ok(state.wiring.contacted(state.close_level))
    }

    fn set_relay(&mut self, active: bool) -> Result<(), HalError> {
        let mut state = self.state.lock();
        Self::ensure_acquired(&state)?;

        let was_active = state.relay_active();
        state.relay_level = state.relay_polarity.level_for(active);
        trace!("Simulated relay level -> {}", state.relay_level);

        if active && !was_active {
            state.activations += 1;
            let now = Instant::now();
            let contacts = state.contacts();
            if let Some(travel) = state.travel.as_mut() {
                travel.press(contacts, now);
            }
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        let mut state = self.state.lock();
        state.relay_level = state.relay_polarity.idle_level();
        state.acquired = false;
        debug!("Simulated pins released");
        Ok(())
    }
}
