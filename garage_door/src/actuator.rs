//! Timed relay actuation.
//!
//! A pulse drives the relay active and hands the restore to a scheduled
//! task on its own thread. Only one pulse may be in flight: a request made
//! while one is pending is rejected with [`CommandOutcome::Busy`] and the
//! pending pulse keeps its full duration. Cancelling the task restores the
//! relay immediately; the restore itself is never skipped.

use garage_hal::SensorPort;
use parking_lot::{Condvar, Mutex};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Port shared between the controller and the restore task.
pub type SharedPort = Arc<Mutex<Box<dyn SensorPort>>>;

/// Result of a door command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommandOutcome {
    /// Relay pulse issued.
    Pulsed,
    /// Door between end positions; pulse suppressed.
    InMotion,
    /// Door already closed; close request ignored.
    AlreadyClosed,
    /// Previous pulse still in flight; request rejected.
    Busy,
    /// Controller hardware not acquired; nothing done.
    NotInitialized,
    /// Sensor or relay I/O failed.
    IoFailed,
}

/// Cancellation point for a pending restore.
#[derive(Debug, Default)]
struct CancelToken {
    cancelled: Mutex<bool>,
    cv: Condvar,
}

impl CancelToken {
    /// Sleep for `timeout` or until cancelled. Returns whether it was cancelled.
    fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut cancelled = self.cancelled.lock();
        while !*cancelled {
            if self.cv.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        *cancelled
    }

    fn cancel(&self) {
        *self.cancelled.lock() = true;
        self.cv.notify_all();
    }
}

/// Scheduled relay restore.
struct PulseTask {
    cancel: Arc<CancelToken>,
    handle: JoinHandle<()>,
}

impl PulseTask {
    fn join(self) {
        if self.handle.join().is_err() {
            error!("Relay restore task panicked");
        }
    }
}

/// Issues single-flight relay pulses.
pub struct Actuator {
    port: SharedPort,
    pulse: Duration,
    in_flight: Arc<AtomicBool>,
    task: Option<PulseTask>,
}

impl Actuator {
    /// Actuator pulsing `port` for `pulse`.
    pub fn new(port: SharedPort, pulse: Duration) -> Self {
        Self {
            port,
            pulse,
            in_flight: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    /// Configured pulse duration.
    pub fn pulse_duration(&self) -> Duration {
        self.pulse
    }

    /// A pulse is active and its restore has not run yet.
    pub fn is_pulsing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Drive the relay active and schedule its restore.
    pub fn pulse(&mut self) -> CommandOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Relay pulse already in flight! Ignoring!");
            return CommandOutcome::Busy;
        }

        // The previous restore cleared the flag; reap its thread.
        if let Some(previous) = self.task.take() {
            previous.join();
        }

        if let Err(e) = self.port.lock().set_relay(true) {
            error!("Failed to energize relay: {}", e);
            self.in_flight.store(false, Ordering::Release);
            return CommandOutcome::IoFailed;
        }
        info!("Kicking door relay for {}ms", self.pulse.as_millis());

        let cancel = Arc::new(CancelToken::default());
        let port = Arc::clone(&self.port);
        let in_flight = Arc::clone(&self.in_flight);
        let task_cancel = Arc::clone(&cancel);
        let pulse = self.pulse;

        let spawned = std::thread::Builder::new()
            .name("relay-restore".to_string())
            .spawn(move || {
                let cancelled = task_cancel.wait(pulse);
                restore(&port, cancelled);
                in_flight.store(false, Ordering::Release);
            });

        match spawned {
            Ok(handle) => {
                self.task = Some(PulseTask { cancel, handle });
                CommandOutcome::Pulsed
            }
            Err(e) => {
                error!("Failed to schedule relay restore: {}", e);
                restore(&self.port, true);
                self.in_flight.store(false, Ordering::Release);
                CommandOutcome::IoFailed
            }
        }
    }

    /// Block until the pending pulse (if any) has restored the relay.
    pub fn wait_idle(&mut self) {
        if let Some(task) = self.task.take() {
            task.join();
        }
    }

    /// Cut the pending pulse short: restore the relay now and wait for it.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel.cancel();
            task.join();
        }
    }
}

impl Drop for Actuator {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn restore(port: &SharedPort, cancelled: bool) {
    match port.lock().set_relay(false) {
        Ok(()) if cancelled => debug!("Relay pulse cancelled, relay idle"),
        Ok(()) => debug!("Relay pulse complete, relay idle"),
        Err(e) => error!("Failed to restore relay to idle: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garage_common::door::config::DoorConfig;
    use garage_hal::drivers::simulation::{SimHandle, SimulatedPort};

    fn actuator(pulse_ms: u64) -> (Actuator, SimHandle) {
        let config = DoorConfig::default();
        let mut port = SimulatedPort::new(&config);
        let handle = port.handle();
        port.init(&config).unwrap();
        let boxed: Box<dyn SensorPort> = Box::new(port);
        let shared: SharedPort = Arc::new(Mutex::new(boxed));
        (Actuator::new(shared, Duration::from_millis(pulse_ms)), handle)
    }

    #[test]
    fn pulse_restores_after_duration() {
        let (mut actuator, handle) = actuator(100);
        let start = Instant::now();
        assert_eq!(actuator.pulse(), CommandOutcome::Pulsed);
        assert!(handle.relay_active());

        actuator.wait_idle();
        assert!(start.elapsed() >= Duration::from_millis(100));
        assert!(!handle.relay_active());
        assert!(!actuator.is_pulsing());
        assert_eq!(handle.activation_count(), 1);
    }

    #[test]
    fn overlapping_pulse_is_rejected() {
        let (mut actuator, handle) = actuator(300);
        assert_eq!(actuator.pulse(), CommandOutcome::Pulsed);
        assert_eq!(actuator.pulse(), CommandOutcome::Busy);
        assert_eq!(handle.activation_count(), 1);
        assert!(handle.relay_active());

        actuator.wait_idle();
        assert_eq!(actuator.pulse(), CommandOutcome::Pulsed);
        assert_eq!(handle.activation_count(), 2);
    }

    #[test]
    fn rejected_pulse_keeps_full_duration() {
        let (mut actuator, handle) = actuator(400);
        let start = Instant::now();
        assert_eq!(actuator.pulse(), CommandOutcome::Pulsed);

        std::thread::sleep(Duration::from_millis(200));
        assert_eq!(actuator.pulse(), CommandOutcome::Busy);
        assert!(handle.relay_active());

        actuator.wait_idle();
        assert!(start.elapsed() >= Duration::from_millis(400));
        assert!(!handle.relay_active());
        assert_eq!(handle.activation_count(), 1);
    }

    #[test]
    fn cancel_restores_immediately() {
        let (mut actuator, handle) = actuator(1000);
        let start = Instant::now();
        actuator.pulse();
        actuator.cancel();
        assert!(start.elapsed() < Duration::from_millis(900));
        assert!(!handle.relay_active());
        assert!(!actuator.is_pulsing());
    }

    #[test]
    fn relay_failure_clears_guard() {
        let config = DoorConfig::default();
        // Never initialized: every relay write fails.
        let boxed: Box<dyn SensorPort> = Box::new(SimulatedPort::new(&config));
        let shared: SharedPort = Arc::new(Mutex::new(boxed));
        let mut actuator = Actuator::new(shared, Duration::from_millis(100));
        assert_eq!(actuator.pulse(), CommandOutcome::IoFailed);
        assert!(!actuator.is_pulsing());
    }
}
