//! # Garage Door Controller
//!
//! Infers the state of a garage door from two reed switches, flags
//! obstructions during closing and pulses the opener relay.
//!
//! # Module Structure
//!
//! - [`translator`] - Fixed sensor-transition → door state table
//! - [`debouncer`] - Level-change detection over raw samples
//! - [`obstruction`] - Closing → Open reversal detection
//! - [`actuator`] - Single-flight timed relay pulses
//! - [`controller`] - `GarageDoorController`, the per-door entry point
//!
//! # Pipeline
//!
//! ```text
//!  poll() ──► SensorPort ──► Debouncer ──► translator ──► ObstructionMonitor
//!                                │ (steady / undecodable)        │
//!                                ▼                               ▼
//!                              None                     Some(StateRecord)
//!
//!  open() / force_open() / close() ──► live sample ──► Actuator ──► relay pulse
//!                                                          │
//!                                                          └─► restore task
//! ```
//!
//! # Example
//!
//! ```rust
//! use garage_common::door::config::DoorConfig;
//! use garage_common::door::types::DoorState;
//! use garage_door::GarageDoorController;
//! use garage_hal::drivers::simulation::SimulatedPort;
//!
//! let config = DoorConfig::default();
//! let port = SimulatedPort::new(&config);
//! let sim = port.handle();
//! let mut door = GarageDoorController::new(&config, Box::new(port));
//!
//! assert_eq!(door.poll().map(|r| r.door_state), Some(DoorState::Closed));
//! sim.set_contacts(false, false);
//! assert_eq!(door.poll().map(|r| r.door_state), Some(DoorState::Opening));
//! ```

#![deny(missing_docs)]

pub mod actuator;
pub mod controller;
pub mod debouncer;
pub mod obstruction;
pub mod translator;

pub use crate::actuator::CommandOutcome;
pub use crate::controller::GarageDoorController;
