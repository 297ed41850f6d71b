//! Raspberry Pi GPIO port (`rpi` feature).
//!
//! Pins are configured by physical header position and resolved to BCM
//! numbers. Sensor inputs get the bias matching the configured wiring; the
//! relay output is driven to its idle level as soon as it is acquired.

use crate::port::{HalError, SensorPort};
use garage_common::consts::bcm_for_physical;
use garage_common::door::config::{DoorConfig, RelayActiveLevel, SensorWiring};
use rppal::gpio::{Gpio, InputPin, Level, OutputPin};
use tracing::{debug, info};

/// Registry name of the GPIO port.
pub const PORT_NAME: &str = "gpio";

/// Factory function to create a GPIO port instance.
pub fn create_port(config: &DoorConfig) -> Box<dyn SensorPort> {
    Box::new(GpioPort::new(config))
}

struct AcquiredPins {
    open: InputPin,
    close: InputPin,
    relay: OutputPin,
}

/// Door pins on the Raspberry Pi header.
pub struct GpioPort {
    wiring: SensorWiring,
    relay_polarity: RelayActiveLevel,
    pins: Option<AcquiredPins>,
}

impl GpioPort {
    /// Create an unacquired port with the polarity settings of `config`.
    pub fn new(config: &DoorConfig) -> Self {
        Self {
            wiring: config.sensor_wiring,
            relay_polarity: config.relay_active,
            pins: None,
        }
    }

    fn pins(&mut self) -> Result<&mut AcquiredPins, HalError> {
        self.pins
            .as_mut()
            .ok_or_else(|| HalError::InitFailed("GPIO pins not acquired".to_string()))
    }

    fn input(&self, gpio: &Gpio, key: &str, pin: u8) -> Result<InputPin, HalError> {
        let raw = get_pin(gpio, key, pin)?;
        Ok(match self.wiring {
            SensorWiring::PullDown => raw.into_input_pulldown(),
            SensorWiring::PullUp => raw.into_input_pullup(),
        })
    }
}

fn get_pin(gpio: &Gpio, key: &str, pin: u8) -> Result<rppal::gpio::Pin, HalError> {
    let bcm = bcm_for_physical(pin).ok_or_else(|| HalError::PinUnavailable {
        pin,
        reason: format!("{key} is not a GPIO header position"),
    })?;
    gpio.get(bcm).map_err(|e| HalError::PinUnavailable {
        pin,
        reason: format!("{key} (BCM {bcm}): {e}"),
    })
}

fn level(high: bool) -> Level {
    if high { Level::High } else { Level::Low }
}

impl SensorPort for GpioPort {
    fn name(&self) -> &'static str {
        PORT_NAME
    }

    fn init(&mut self, config: &DoorConfig) -> Result<(), HalError> {
        let gpio = Gpio::new().map_err(|e| HalError::InitFailed(e.to_string()))?;

        // Any error drops the pins already taken, which resets them.
        let open = self.input(&gpio, "open_pin", config.open_pin)?;
        let close = self.input(&gpio, "close_pin", config.close_pin)?;
        let relay_raw = get_pin(&gpio, "relay_pin", config.relay_pin)?;
        let relay = if self.relay_polarity.idle_level() {
            relay_raw.into_output_high()
        } else {
            relay_raw.into_output_low()
        };

        self.pins = Some(AcquiredPins { open, close, relay });
        info!(
            "GPIO pins acquired (open={}, close={}, relay={})",
            config.open_pin, config.close_pin, config.relay_pin
        );
        Ok(())
    }

    fn read_open_sensor(&mut self) -> Result<bool, HalError> {
        let wiring = self.wiring;
        let pins = self.pins()?;
        Ok(wiring.contacted(pins.open.read() == Level::High))
    }

    fn read_close_sensor(&mut self) -> Result<bool, HalError> {
        let wiring = self.wiring;
        let pins = self.pins()?;
        Ok(wiring.contacted(pins.close.read() == Level::High))
    }

    fn set_relay(&mut self, active: bool) -> Result<(), HalError> {
        let high = self.relay_polarity.level_for(active);
        let pins = self.pins()?;
        pins.relay.write(level(high));
        debug!("Relay -> {}", if active { "active" } else { "idle" });
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        if self.pins.is_some() {
            self.set_relay(false)?;
        }
        self.pins = None;
        info!("GPIO pins released");
        Ok(())
    }
}
