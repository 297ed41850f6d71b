//! Door domain shared between the port backends and the controller.
//!
//! - [`types`] - Door state model (samples, records, controller state)
//! - [`config`] - Per-door configuration and wiring polarity
//! - [`codes`] - Numeric codes for the external reporting layer

pub mod codes;
pub mod config;
pub mod types;
