//! Sensor-to-state translation table.
//!
//! The four sensor levels (current open, current close, previous open,
//! previous close) pack into a 4-bit key. Only the two legal traversal
//! edges of the door (Open ↔ moving ↔ Closed) plus the two "still resting"
//! keys are mapped; every other key is [`DoorState::Unknown`].

use garage_common::door::types::{ContactState, DoorState, StateRecord, TargetDoorState};

/// Packed translation key: bit 3 = open now, bit 2 = close now,
/// bit 1 = open previous, bit 0 = close previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionKey(u8);

impl TransitionKey {
    /// Pack the four sensor levels.
    pub const fn new(open_now: bool, close_now: bool, open_prev: bool, close_prev: bool) -> Self {
        Self(
            (open_now as u8) << 3
                | (close_now as u8) << 2
                | (open_prev as u8) << 1
                | close_prev as u8,
        )
    }

    /// Packed bits.
    pub const fn bits(&self) -> u8 {
        self.0
    }
}

/// Door state for a key. Total over all sixteen keys.
pub const fn lookup(key: TransitionKey) -> DoorState {
    match key.0 {
        // open now, resting or just arrived
        0b1000 | 0b1010 => DoorState::Open,
        // closed now, resting or just arrived
        0b0100 | 0b0101 => DoorState::Closed,
        // both off, was open
        0b0010 => DoorState::Closing,
        // both off, was closed
        0b0001 => DoorState::Opening,
        _ => DoorState::Unknown,
    }
}

/// Translate a sensor transition into a reportable record.
///
/// Returns `None` for the [`DoorState::Unknown`] keys.
pub fn translate(
    open_now: bool,
    close_now: bool,
    open_prev: bool,
    close_prev: bool,
) -> Option<StateRecord> {
    record_for(lookup(TransitionKey::new(
        open_now, close_now, open_prev, close_prev,
    )))
}

fn record_for(door_state: DoorState) -> Option<StateRecord> {
    let (target, open_contact, close_contact) = match door_state {
        DoorState::Open => (
            TargetDoorState::Open,
            ContactState::Detected,
            ContactState::NotDetected,
        ),
        DoorState::Closed => (
            TargetDoorState::Closed,
            ContactState::NotDetected,
            ContactState::Detected,
        ),
        DoorState::Closing => (
            TargetDoorState::Closed,
            ContactState::NotDetected,
            ContactState::NotDetected,
        ),
        DoorState::Opening => (
            TargetDoorState::Open,
            ContactState::NotDetected,
            ContactState::NotDetected,
        ),
        DoorState::Unknown => return None,
    };

    Some(StateRecord {
        door_state,
        target,
        label: door_state.label(),
        open_contact,
        close_contact,
        motion_detected: door_state.is_moving(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_keys() -> impl Iterator<Item = TransitionKey> {
        (0u8..16).map(TransitionKey)
    }

    fn key(bits: [u8; 4]) -> TransitionKey {
        TransitionKey::new(bits[0] == 1, bits[1] == 1, bits[2] == 1, bits[3] == 1)
    }

    #[test]
    fn key_packing_is_order_sensitive() {
        assert_eq!(key([1, 0, 0, 0]).bits(), 0b1000);
        assert_eq!(key([0, 0, 0, 1]).bits(), 0b0001);
        assert_ne!(key([1, 0, 0, 0]), key([0, 0, 1, 0]));
    }

    #[test]
    fn defined_rows() {
        let rows = [
            ([1, 0, 0, 0], DoorState::Open, TargetDoorState::Open, false),
            ([0, 1, 0, 0], DoorState::Closed, TargetDoorState::Closed, false),
            ([0, 0, 1, 0], DoorState::Closing, TargetDoorState::Closed, true),
            ([0, 0, 0, 1], DoorState::Opening, TargetDoorState::Open, true),
            ([1, 0, 1, 0], DoorState::Open, TargetDoorState::Open, false),
            ([0, 1, 0, 1], DoorState::Closed, TargetDoorState::Closed, false),
        ];
        for (bits, state, target, motion) in rows {
            let record = translate(bits[0] == 1, bits[1] == 1, bits[2] == 1, bits[3] == 1)
                .unwrap_or_else(|| panic!("{bits:?} should be defined"));
            assert_eq!(record.door_state, state, "{bits:?}");
            assert_eq!(record.target, target, "{bits:?}");
            assert_eq!(record.motion_detected, motion, "{bits:?}");
            assert_eq!(record.label, state.label());
        }
    }

    #[test]
    fn contacts_follow_state() {
        let open = translate(true, false, false, false).unwrap();
        assert_eq!(open.open_contact, ContactState::Detected);
        assert_eq!(open.close_contact, ContactState::NotDetected);

        let closed = translate(false, true, false, true).unwrap();
        assert_eq!(closed.open_contact, ContactState::NotDetected);
        assert_eq!(closed.close_contact, ContactState::Detected);
        assert_eq!(closed.label, "Closed");

        let closing = translate(false, false, true, false).unwrap();
        assert_eq!(closing.open_contact, ContactState::NotDetected);
        assert_eq!(closing.close_contact, ContactState::NotDetected);
    }

    #[test]
    fn exactly_six_keys_defined() {
        let defined = all_keys()
            .filter(|k| lookup(*k) != DoorState::Unknown)
            .count();
        assert_eq!(all_keys().count(), 16);
        assert_eq!(defined, 6);
    }

    #[test]
    fn both_sensors_active_is_unknown() {
        for prev in 0u8..4 {
            let k = TransitionKey::new(true, true, prev & 0b10 != 0, prev & 0b01 != 0);
            assert_eq!(lookup(k), DoorState::Unknown);
        }
    }

    #[test]
    fn unmapped_examples() {
        // Direct end-to-end jump without passing through "moving".
        assert!(translate(true, false, false, true).is_none());
        assert!(translate(false, true, true, false).is_none());
        // Both off after both off.
        assert!(translate(false, false, false, false).is_none());
    }
}
