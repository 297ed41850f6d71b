//! Port implementations.
//!
//! - [`simulation`] - In-memory port for development and testing
//! - `gpio` - Raspberry Pi GPIO through `rppal` (feature `rpi`)

#[cfg(feature = "rpi")]
pub mod gpio;
pub mod simulation;

use crate::port_registry::PortRegistry;

/// Register all built-in ports.
pub fn register_all_ports(registry: &mut PortRegistry) {
    registry.register(simulation::PORT_NAME, simulation::create_port);

    #[cfg(feature = "rpi")]
    registry.register(gpio::PORT_NAME, gpio::create_port);
}
