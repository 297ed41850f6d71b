//! Prelude module for common re-exports.
//!
//! ```rust
//! use garage_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{AppConfig, ConfigError, ConfigLoader, LogLevel, SharedConfig};
pub use crate::door::config::{DoorConfig, RelayActiveLevel, SensorWiring};

// ─── Door model ─────────────────────────────────────────────────────
pub use crate::door::types::{
    ContactState, ControllerState, DoorState, RawSample, StateRecord, TargetDoorState,
};
