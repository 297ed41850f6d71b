//! Simulation port integration tests: registry construction, polarity
//! handling across every wiring/relay combination.

use garage_common::door::config::{DoorConfig, RelayActiveLevel, SensorWiring};
use garage_common::door::types::RawSample;
use garage_hal::drivers::simulation::SimulatedPort;
use garage_hal::{HalError, PortRegistry, SensorPort};
use proptest::prelude::*;

fn config_for(wiring: SensorWiring, relay: RelayActiveLevel) -> DoorConfig {
    DoorConfig {
        sensor_wiring: wiring,
        relay_active: relay,
        ..DoorConfig::default()
    }
}

fn wirings() -> impl Strategy<Value = SensorWiring> {
    prop_oneof![Just(SensorWiring::PullDown), Just(SensorWiring::PullUp)]
}

fn relays() -> impl Strategy<Value = RelayActiveLevel> {
    prop_oneof![Just(RelayActiveLevel::High), Just(RelayActiveLevel::Low)]
}

proptest! {
    #[test]
    fn logical_contacts_survive_any_wiring(
        wiring in wirings(),
        relay in relays(),
        open in any::<bool>(),
        close in any::<bool>(),
    ) {
        let config = config_for(wiring, relay);
        let mut port = SimulatedPort::new(&config);
        let handle = port.handle();
        port.init(&config).unwrap();

        handle.set_contacts(open, close);
        prop_assert_eq!(port.read_sample().unwrap(), RawSample::new(open, close));

        port.set_relay(true).unwrap();
        prop_assert!(handle.relay_active());
        prop_assert_eq!(handle.relay_level(), relay.level_for(true));
        port.set_relay(false).unwrap();
        prop_assert_eq!(handle.relay_level(), relay.idle_level());
    }
}

#[test]
fn registry_creates_uninitialized_simulation_port() {
    let registry = PortRegistry::with_builtin_ports();
    let config = DoorConfig::default();
    let mut port = registry.create_port("simulation", &config).unwrap();
    assert_eq!(port.name(), "simulation");
    assert!(matches!(port.read_sample(), Err(HalError::InitFailed(_))));

    port.init(&config).unwrap();
    assert_eq!(port.read_sample().unwrap(), RawSample::new(false, true));
}

#[cfg(not(feature = "rpi"))]
#[test]
fn gpio_port_absent_without_feature() {
    let registry = PortRegistry::with_builtin_ports();
    let result = registry.create_port("gpio", &DoorConfig::default());
    assert!(matches!(result, Err(HalError::PortNotFound(name)) if name == "gpio"));
}
