//! # Garage HAL Library
//!
//! I/O abstraction for the garage door controller with pluggable port
//! backends. Ports implement the [`SensorPort`] trait: two contact sensor
//! inputs and one relay output.
//!
//! # Module Structure
//!
//! - [`port`] - `SensorPort` trait and `HalError`
//! - [`port_registry`] - Port factory registration
//! - [`drivers`] - Port implementations (simulation, Raspberry Pi GPIO)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      garage_hal                         │
//! │  ┌──────────────┐    ┌──────────────────────────────┐   │
//! │  │ PortRegistry │───►│  SensorPort (trait object)   │   │
//! │  └──────────────┘    └──────┬───────────────┬───────┘   │
//! │                             │               │           │
//! │                     ┌───────▼──────┐ ┌──────▼───────┐   │
//! │                     │SimulatedPort │ │  GpioPort    │   │
//! │                     │ (SimHandle)  │ │ (rppal, rpi) │   │
//! │                     └──────────────┘ └──────────────┘   │
//! └─────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod drivers;
pub mod port;
pub mod port_registry;

// Re-export key types for convenience
pub use crate::port::{HalError, PortFactory, SensorPort};
pub use crate::port_registry::PortRegistry;
