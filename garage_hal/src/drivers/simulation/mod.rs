//! Simulation port module.
//!
//! Software stand-in for the door pins so the controller runs without
//! physical hardware. Tests drive it through a [`SimHandle`].

mod port;
mod travel;

pub use port::{SimHandle, SimulatedPort};
pub use travel::{DoorTravel, Sensor};

use crate::port::SensorPort;
use garage_common::door::config::DoorConfig;

/// Registry name of the simulation port.
pub const PORT_NAME: &str = "simulation";

/// Factory function to create a simulation port instance.
pub fn create_port(config: &DoorConfig) -> Box<dyn SensorPort> {
    Box::new(SimulatedPort::new(config))
}
