//! Per-door configuration.
//!
//! This module contains:
//! - `DoorConfig` - The `[door]` section of `garage.toml`
//! - `SensorWiring` - How a contact reed switch maps to a pin level
//! - `RelayActiveLevel` - Which pin level energizes the relay

use crate::config::ConfigError;
use crate::consts::{
    DEFAULT_CLOSE_PIN, DEFAULT_DOOR_NAME, DEFAULT_HEARTBEAT_INTERVAL_MS,
    DEFAULT_OPENCLOSE_TIMEOUT_MS, DEFAULT_OPEN_PIN, DEFAULT_RELAY_PIN, MAX_HEARTBEAT_INTERVAL_MS,
    MAX_OPENCLOSE_TIMEOUT_MS, MAX_PIN, MIN_HEARTBEAT_INTERVAL_MS, MIN_OPENCLOSE_TIMEOUT_MS,
    MIN_PIN,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sensor input bias and wiring.
///
/// `PullDown` when the switch connects the pin to +Vcc (contacted reads
/// high), `PullUp` when it connects to ground (contacted reads low).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorWiring {
    /// Pin pulled low; contacted reads high.
    #[default]
    PullDown,
    /// Pin pulled high; contacted reads low.
    PullUp,
}

impl SensorWiring {
    /// Logical "contacted" value for a raw pin level (true = high).
    pub const fn contacted(&self, level_high: bool) -> bool {
        match self {
            SensorWiring::PullDown => level_high,
            SensorWiring::PullUp => !level_high,
        }
    }

    /// Raw pin level (true = high) that produces the given contact reading.
    pub const fn level_for(&self, contacted: bool) -> bool {
        match self {
            SensorWiring::PullDown => contacted,
            SensorWiring::PullUp => !contacted,
        }
    }
}

/// Relay output polarity. The idle level is the inverse of the active level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayActiveLevel {
    /// Relay energized by driving the pin high.
    High,
    /// Relay energized by driving the pin low (common opto-isolated modules).
    #[default]
    Low,
}

impl RelayActiveLevel {
    /// Raw pin level (true = high) for the logical relay state.
    pub const fn level_for(&self, active: bool) -> bool {
        match self {
            RelayActiveLevel::High => active,
            RelayActiveLevel::Low => !active,
        }
    }

    /// Raw pin level (true = high) while the relay is released.
    pub const fn idle_level(&self) -> bool {
        self.level_for(false)
    }
}

/// `[door]` section of `garage.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoorConfig {
    /// Door name used in log lines and status output.
    pub name: String,
    /// Physical header pin of the "open" reed switch.
    pub open_pin: u8,
    /// Physical header pin of the "closed" reed switch.
    pub close_pin: u8,
    /// Physical header pin of the door relay.
    pub relay_pin: u8,
    /// Relay pulse duration in milliseconds.
    pub openclose_timeout_ms: u64,
    /// Poll interval of the heartbeat loop in milliseconds.
    pub heartbeat_interval_ms: u64,
    /// Use the simulated port instead of real GPIO.
    pub mock: bool,
    /// Reed switch wiring.
    pub sensor_wiring: SensorWiring,
    /// Relay module polarity.
    pub relay_active: RelayActiveLevel,
    /// Simulated door travel time in milliseconds; 0 disables simulated travel.
    pub sim_travel_ms: u64,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DOOR_NAME.to_string(),
            open_pin: DEFAULT_OPEN_PIN,
            close_pin: DEFAULT_CLOSE_PIN,
            relay_pin: DEFAULT_RELAY_PIN,
            openclose_timeout_ms: DEFAULT_OPENCLOSE_TIMEOUT_MS,
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL_MS,
            mock: false,
            sensor_wiring: SensorWiring::default(),
            relay_active: RelayActiveLevel::default(),
            sim_travel_ms: 0,
        }
    }
}

impl DoorConfig {
    /// Validate the door configuration.
    ///
    /// # Validation Rules
    /// 1. `name` not empty
    /// 2. every pin within [MIN_PIN, MAX_PIN]
    /// 3. the three pins are distinct
    /// 4. `openclose_timeout_ms` within [MIN_OPENCLOSE_TIMEOUT_MS, MAX_OPENCLOSE_TIMEOUT_MS]
    /// 5. `heartbeat_interval_ms` within [MIN_HEARTBEAT_INTERVAL_MS, MAX_HEARTBEAT_INTERVAL_MS]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "door name cannot be empty".to_string(),
            ));
        }

        for (key, pin) in self.pins() {
            if !(MIN_PIN..=MAX_PIN).contains(&pin) {
                return Err(ConfigError::ValidationError(format!(
                    "{key} = {pin} out of range [{MIN_PIN}, {MAX_PIN}]"
                )));
            }
        }

        if self.open_pin == self.close_pin
            || self.open_pin == self.relay_pin
            || self.close_pin == self.relay_pin
        {
            return Err(ConfigError::ValidationError(format!(
                "pins must be distinct (open={}, close={}, relay={})",
                self.open_pin, self.close_pin, self.relay_pin
            )));
        }

        if !(MIN_OPENCLOSE_TIMEOUT_MS..=MAX_OPENCLOSE_TIMEOUT_MS)
            .contains(&self.openclose_timeout_ms)
        {
            return Err(ConfigError::ValidationError(format!(
                "openclose_timeout_ms = {} out of range [{MIN_OPENCLOSE_TIMEOUT_MS}, {MAX_OPENCLOSE_TIMEOUT_MS}]",
                self.openclose_timeout_ms
            )));
        }

        if !(MIN_HEARTBEAT_INTERVAL_MS..=MAX_HEARTBEAT_INTERVAL_MS)
            .contains(&self.heartbeat_interval_ms)
        {
            return Err(ConfigError::ValidationError(format!(
                "heartbeat_interval_ms = {} out of range [{MIN_HEARTBEAT_INTERVAL_MS}, {MAX_HEARTBEAT_INTERVAL_MS}]",
                self.heartbeat_interval_ms
            )));
        }

        Ok(())
    }

    /// The three pins with their config key names, acquisition order.
    pub fn pins(&self) -> [(&'static str, u8); 3] {
        [
            ("open_pin", self.open_pin),
            ("close_pin", self.close_pin),
            ("relay_pin", self.relay_pin),
        ]
    }

    /// Relay pulse duration.
    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.openclose_timeout_ms)
    }

    /// Heartbeat interval.
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }
}
