//! Sensor port trait and error types.
//!
//! This module defines:
//! - `SensorPort` trait - Interface for the door I/O capability
//! - `HalError` enum - Error types for port operations
//! - `PortFactory` type alias - Factory function type

use garage_common::door::config::DoorConfig;
use garage_common::door::types::RawSample;
use thiserror::Error;

/// Error types for port operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HalError {
    /// Port initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// A pin could not be acquired
    #[error("Pin {pin} unavailable: {reason}")]
    PinUnavailable {
        /// Physical header pin
        pin: u8,
        /// Backend reason
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Port backend not found
    #[error("Port not found: {0}")]
    PortNotFound(String),
}

/// Factory function type for creating port instances.
pub type PortFactory = fn(&DoorConfig) -> Box<dyn SensorPort>;

/// Door I/O capability: two contact sensor inputs and one relay output.
///
/// All values are logical: `true` from a read means the reed switch is
/// contacted, `true` to [`SensorPort::set_relay`] energizes the relay.
/// Wiring polarity is resolved inside the port.
///
/// # Lifecycle
///
/// 1. `init()` - Acquire all three pins, relay driven idle. All-or-nothing.
/// 2. reads / `set_relay()` - any number of times
/// 3. `shutdown()` - Relay driven idle, pins released
pub trait SensorPort: Send {
    /// Returns the port's unique identifier (e.g., "simulation", "gpio").
    fn name(&self) -> &'static str;

    /// Acquire the sensor and relay pins named in `config`.
    ///
    /// # Errors
    /// Returns `HalError::PinUnavailable` or `HalError::InitFailed` if any pin
    /// cannot be acquired. No pin stays acquired on failure.
    fn init(&mut self, config: &DoorConfig) -> Result<(), HalError>;

    /// Read the "door open" contact sensor.
    fn read_open_sensor(&mut self) -> Result<bool, HalError>;

    /// Read the "door closed" contact sensor.
    fn read_close_sensor(&mut self) -> Result<bool, HalError>;

    /// Drive the relay output.
    fn set_relay(&mut self, active: bool) -> Result<(), HalError>;

    /// Read both sensors, open sensor first.
    fn read_sample(&mut self) -> Result<RawSample, HalError> {
        let open_active = self.read_open_sensor()?;
        let close_active = self.read_close_sensor()?;
        Ok(RawSample::new(open_active, close_active))
    }

    /// Release the pins. Default drives the relay idle.
    fn shutdown(&mut self) -> Result<(), HalError> {
        self.set_relay(false)
    }
}
