//! `garage.toml` loading tests: defaults, overrides, polarity keys,
//! unknown field rejection, numeric bounds validation.

use garage_common::config::{AppConfig, ConfigError, ConfigLoader, LogLevel};
use garage_common::door::config::{RelayActiveLevel, SensorWiring};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("garage.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_full_config() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
[shared]
log_level = "debug"
service_name = "garage-east"

[door]
name = "East Door"
open_pin = 16
close_pin = 18
relay_pin = 22
openclose_timeout_ms = 250
heartbeat_interval_ms = 1000
mock = true
sensor_wiring = "pull_up"
relay_active = "high"
sim_travel_ms = 3000
"#,
    );

    let config = AppConfig::load_validated(&path).unwrap();
    assert_eq!(config.shared.log_level, LogLevel::Debug);
    assert_eq!(config.shared.service_name, "garage-east");
    assert_eq!(config.door.name, "East Door");
    assert_eq!(config.door.open_pin, 16);
    assert_eq!(config.door.close_pin, 18);
    assert_eq!(config.door.relay_pin, 22);
    assert_eq!(config.door.openclose_timeout_ms, 250);
    assert_eq!(config.door.heartbeat_interval_ms, 1000);
    assert!(config.door.mock);
    assert_eq!(config.door.sensor_wiring, SensorWiring::PullUp);
    assert_eq!(config.door.relay_active, RelayActiveLevel::High);
    assert_eq!(config.door.sim_travel_ms, 3000);
}

#[test]
fn partial_door_section_keeps_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
[door]
relay_pin = 11
"#,
    );

    let config = AppConfig::load_validated(&path).unwrap();
    assert_eq!(config.door.relay_pin, 11);
    assert_eq!(config.door.open_pin, 12);
    assert_eq!(config.door.close_pin, 15);
    assert_eq!(config.door.openclose_timeout_ms, 400);
    assert_eq!(config.door.sensor_wiring, SensorWiring::PullDown);
    assert_eq!(config.door.relay_active, RelayActiveLevel::Low);
    assert!(!config.door.mock);
}

#[test]
fn unknown_door_field_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
[door]
open_pn = 12
"#,
    );

    let result = AppConfig::load_validated(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn out_of_range_timeout_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
[door]
openclose_timeout_ms = 5000
"#,
    );

    match AppConfig::load_validated(&path) {
        Err(ConfigError::ValidationError(msg)) => {
            assert!(msg.contains("openclose_timeout_ms"), "{msg}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn bad_wiring_value_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
[door]
sensor_wiring = "floating"
"#,
    );

    assert!(matches!(
        AppConfig::load_validated(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn shipped_config_matches_defaults() {
    let config = AppConfig::from_toml(include_str!("../../config/garage.toml")).unwrap();
    config.validate().unwrap();
    assert_eq!(config, AppConfig::default());
}
