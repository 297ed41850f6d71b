//! Numeric codes for the external reporting layer.
//!
//! The reporting contract numbers door states as Open=0, Closed=1,
//! Opening=2, Closing=3 (Stopped=4 is never produced). Contact sensors
//! report Detected=0, NotDetected=1. These tables are the only place the
//! internal enums meet numbers.

use crate::door::types::{ContactState, DoorState, TargetDoorState};

/// Current door state code. `None` for [`DoorState::Unknown`].
pub const fn current_door_state_code(state: DoorState) -> Option<u8> {
    match state {
        DoorState::Open => Some(0),
        DoorState::Closed => Some(1),
        DoorState::Opening => Some(2),
        DoorState::Closing => Some(3),
        DoorState::Unknown => None,
    }
}

/// Target door state code.
pub const fn target_door_state_code(target: TargetDoorState) -> u8 {
    match target {
        TargetDoorState::Open => 0,
        TargetDoorState::Closed => 1,
    }
}

/// Contact sensor state code.
pub const fn contact_state_code(contact: ContactState) -> u8 {
    match contact {
        ContactState::Detected => 0,
        ContactState::NotDetected => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_state_codes() {
        assert_eq!(current_door_state_code(DoorState::Open), Some(0));
        assert_eq!(current_door_state_code(DoorState::Closed), Some(1));
        assert_eq!(current_door_state_code(DoorState::Opening), Some(2));
        assert_eq!(current_door_state_code(DoorState::Closing), Some(3));
        assert_eq!(current_door_state_code(DoorState::Unknown), None);
    }

    #[test]
    fn target_and_contact_codes() {
        assert_eq!(target_door_state_code(TargetDoorState::Open), 0);
        assert_eq!(target_door_state_code(TargetDoorState::Closed), 1);
        assert_eq!(contact_state_code(ContactState::Detected), 0);
        assert_eq!(contact_state_code(ContactState::NotDetected), 1);
    }
}
