//! Obstruction detection over the sequence of translated door states.
//!
//! A door observed `Open` right after `Closing` reversed without finishing
//! the close (safety reverse or blockage). The flag stays raised until the
//! door next reports `Closed`.

use garage_common::door::types::DoorState;
use tracing::{info, warn};

/// Watches defined door states and keeps the obstruction flag.
#[derive(Debug, Clone)]
pub struct ObstructionMonitor {
    last_door_state: DoorState,
    obstruction: bool,
}

impl Default for ObstructionMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstructionMonitor {
    /// Monitor for a door assumed closed, no obstruction.
    pub fn new() -> Self {
        Self {
            last_door_state: DoorState::Closed,
            obstruction: false,
        }
    }

    /// Last observed state.
    pub fn last_door_state(&self) -> DoorState {
        self.last_door_state
    }

    /// Obstruction flag.
    pub fn obstruction(&self) -> bool {
        self.obstruction
    }

    /// Observe a defined state. Returns `true` when this call raised a flag
    /// that was previously clear.
    ///
    /// Must not be fed [`DoorState::Unknown`]; such calls are ignored.
    pub fn observe(&mut self, new_state: DoorState) -> bool {
        if new_state == DoorState::Unknown {
            return false;
        }

        let mut raised = false;
        if self.last_door_state == DoorState::Closing && new_state == DoorState::Open {
            warn!("Obstruction detected!!");
            raised = !self.obstruction;
            self.obstruction = true;
        } else if self.obstruction && new_state == DoorState::Closed {
            info!("Obstruction cleared");
            self.obstruction = false;
        }

        self.last_door_state = new_state;
        raised
    }
}
