//! Door state model.
//!
//! Plain data shared by the controller core and its consumers. None of these
//! types carry numeric discriminants; see [`super::codes`] for the external
//! numeric contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instantaneous logical sensor levels (true = sensor contacted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RawSample {
    /// "Door open" reed switch contacted.
    pub open_active: bool,
    /// "Door closed" reed switch contacted.
    pub close_active: bool,
}

impl RawSample {
    /// Create a sample from the two sensor levels.
    pub const fn new(open_active: bool, close_active: bool) -> Self {
        Self {
            open_active,
            close_active,
        }
    }

    /// Neither end-of-travel sensor contacted: the door is between positions.
    pub const fn in_motion(&self) -> bool {
        !self.open_active && !self.close_active
    }

    /// Both sensors contacted. Impossible on a correctly wired door.
    pub const fn is_invalid(&self) -> bool {
        self.open_active && self.close_active
    }
}

/// Physical door state inferred from sensor transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorState {
    /// Resting at the open end of travel.
    Open,
    /// Resting at the closed end of travel.
    Closed,
    /// Left the closed position, heading open.
    Opening,
    /// Left the open position, heading closed.
    Closing,
    /// No defined transition for the observed sensor combination.
    Unknown,
}

impl DoorState {
    /// Human-readable state name.
    pub const fn label(&self) -> &'static str {
        match self {
            DoorState::Open => "Open",
            DoorState::Closed => "Closed",
            DoorState::Opening => "Opening",
            DoorState::Closing => "Closing",
            DoorState::Unknown => "Unknown",
        }
    }

    /// Door is travelling between end positions.
    pub const fn is_moving(&self) -> bool {
        matches!(self, DoorState::Opening | DoorState::Closing)
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// End position the door is heading towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetDoorState {
    /// Heading to (or resting at) the open position.
    Open,
    /// Heading to (or resting at) the closed position.
    Closed,
}

/// Contact sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactState {
    /// Magnet at the switch.
    Detected,
    /// Magnet away from the switch.
    NotDetected,
}

impl From<bool> for ContactState {
    fn from(active: bool) -> Self {
        if active {
            ContactState::Detected
        } else {
            ContactState::NotDetected
        }
    }
}

/// Translated, reportable snapshot produced on a detected sensor change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateRecord {
    /// Inferred door state. Never [`DoorState::Unknown`].
    pub door_state: DoorState,
    /// End position the door is heading towards.
    pub target: TargetDoorState,
    /// Human-readable state name.
    pub label: &'static str,
    /// Open sensor reading.
    pub open_contact: ContactState,
    /// Close sensor reading.
    pub close_contact: ContactState,
    /// Door is travelling.
    pub motion_detected: bool,
}

/// Per-door controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerState {
    /// Pin acquisition at construction succeeded.
    pub initialized: bool,
    /// Last defined door state.
    pub last_door_state: DoorState,
    /// Door reversed out of a close without completing it.
    pub obstruction: bool,
}

impl ControllerState {
    /// Initial state for a controller whose I/O acquisition returned `initialized`.
    pub const fn new(initialized: bool) -> Self {
        Self {
            initialized,
            last_door_state: DoorState::Closed,
            obstruction: false,
        }
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new(false)
    }
}
