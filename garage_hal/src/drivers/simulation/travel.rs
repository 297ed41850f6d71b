//! Simulated door travel.
//!
//! A relay press queues delayed contact changes the way a real opener
//! moves the door: the door leaves its end position shortly after the
//! press and reaches the other end after the travel time. A press while
//! the door is moving stops it; the next press reverses direction.

use garage_common::door::types::{RawSample, TargetDoorState};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Which reed switch a queued change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    /// "Door open" switch.
    Open,
    /// "Door closed" switch.
    Close,
}

/// Pending contact change queued by a press.
#[derive(Debug, Clone)]
struct PendingContactChange {
    /// When this change should be applied
    trigger_time: Instant,
    /// Switch to change
    sensor: Sensor,
    /// New contact state
    contacted: bool,
}

/// Door travel model driven by relay presses.
#[derive(Debug, Clone)]
pub struct DoorTravel {
    /// Full end-to-end travel time
    travel: Duration,
    /// Time for the door to clear the end-position switch
    depart: Duration,
    /// Queue of pending contact changes, time-ordered
    pending: VecDeque<PendingContactChange>,
    /// Direction of the current or most recent movement
    heading: TargetDoorState,
}

impl DoorTravel {
    /// Create a travel model with the given end-to-end travel time.
    pub fn new(travel: Duration) -> Self {
        Self {
            travel,
            depart: travel / 10,
            pending: VecDeque::new(),
            heading: TargetDoorState::Closed,
        }
    }

    /// Door is moving (changes still queued).
    pub fn is_moving(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Direction of the current or most recent movement.
    pub fn heading(&self) -> TargetDoorState {
        self.heading
    }

    /// Handle a relay press given the current contacts.
    pub fn press(&mut self, contacts: RawSample, now: Instant) {
        if self.is_moving() {
            self.pending.clear();
            debug!("Simulated door stopped mid-travel");
            return;
        }

        if contacts.close_active {
            self.start(TargetDoorState::Open, now, true);
        } else if contacts.open_active {
            self.start(TargetDoorState::Closed, now, true);
        } else {
            // Parked between end positions: run the other way.
            let reverse = match self.heading {
                TargetDoorState::Open => TargetDoorState::Closed,
                TargetDoorState::Closed => TargetDoorState::Open,
            };
            self.start(reverse, now, false);
        }
    }

    /// Safety reversal of a closing door: drop the close, run back open.
    ///
    /// Returns `false` if the door was not closing.
    pub fn safety_reverse(&mut self, now: Instant) -> bool {
        if !self.is_moving() || self.heading != TargetDoorState::Closed {
            return false;
        }
        self.pending.clear();
        self.heading = TargetDoorState::Open;
        self.queue(now + self.travel / 2, Sensor::Open, true);
        debug!("Simulated door reversing (obstruction)");
        true
    }

    /// Take every pending change whose time has arrived.
    pub fn due(&mut self, now: Instant) -> Vec<(Sensor, bool)> {
        let mut changes = Vec::new();
        while let Some(front) = self.pending.front() {
            if front.trigger_time > now {
                break;
            }
            if let Some(change) = self.pending.pop_front() {
                changes.push((change.sensor, change.contacted));
            }
        }
        changes
    }

    fn start(&mut self, heading: TargetDoorState, now: Instant, from_end: bool) {
        self.heading = heading;
        let (leaving, arriving) = match heading {
            TargetDoorState::Open => (Sensor::Close, Sensor::Open),
            TargetDoorState::Closed => (Sensor::Open, Sensor::Close),
        };
        if from_end {
            self.queue(now + self.depart, leaving, false);
        }
        self.queue(now + self.travel, arriving, true);
        debug!("Simulated door moving towards {:?}", heading);
    }

    fn queue(&mut self, trigger_time: Instant, sensor: Sensor, contacted: bool) {
        trace!(
            "queued {:?} = {} in {:?}",
            sensor,
            contacted,
            trigger_time.saturating_duration_since(Instant::now())
        );
        self.pending.push_back(PendingContactChange {
            trigger_time,
            sensor,
            contacted,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAVEL: Duration = Duration::from_millis(1000);

    #[test]
    fn press_from_closed_opens() {
        let mut travel = DoorTravel::new(TRAVEL);
        let t0 = Instant::now();
        travel.press(RawSample::new(false, true), t0);
        assert!(travel.is_moving());
        assert_eq!(travel.heading(), TargetDoorState::Open);

        assert!(travel.due(t0).is_empty());
        assert_eq!(
            travel.due(t0 + Duration::from_millis(100)),
            vec![(Sensor::Close, false)]
        );
        assert!(travel.due(t0 + Duration::from_millis(500)).is_empty());
        assert_eq!(travel.due(t0 + TRAVEL), vec![(Sensor::Open, true)]);
        assert!(!travel.is_moving());
    }

    #[test]
    fn press_from_open_closes() {
        let mut travel = DoorTravel::new(TRAVEL);
        let t0 = Instant::now();
        travel.press(RawSample::new(true, false), t0);
        assert_eq!(travel.heading(), TargetDoorState::Closed);
        assert_eq!(
            travel.due(t0 + TRAVEL),
            vec![(Sensor::Open, false), (Sensor::Close, true)]
        );
    }

    #[test]
    fn press_while_moving_stops_then_reverses() {
        let mut travel = DoorTravel::new(TRAVEL);
        let t0 = Instant::now();
        travel.press(RawSample::new(true, false), t0);
        let _ = travel.due(t0 + Duration::from_millis(200));

        travel.press(RawSample::new(false, false), t0 + Duration::from_millis(300));
        assert!(!travel.is_moving());

        let t1 = t0 + Duration::from_millis(400);
        travel.press(RawSample::new(false, false), t1);
        assert_eq!(travel.heading(), TargetDoorState::Open);
        assert_eq!(travel.due(t1 + TRAVEL), vec![(Sensor::Open, true)]);
    }

    #[test]
    fn safety_reverse_only_while_closing() {
        let mut travel = DoorTravel::new(TRAVEL);
        let t0 = Instant::now();
        assert!(!travel.safety_reverse(t0));

        travel.press(RawSample::new(true, false), t0);
        let _ = travel.due(t0 + Duration::from_millis(200));
        assert!(travel.safety_reverse(t0 + Duration::from_millis(300)));
        assert_eq!(travel.heading(), TargetDoorState::Open);
        assert_eq!(
            travel.due(t0 + Duration::from_millis(800)),
            vec![(Sensor::Open, true)]
        );
        assert!(!travel.safety_reverse(t0 + Duration::from_millis(900)));
    }
}
