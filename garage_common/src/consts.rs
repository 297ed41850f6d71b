//! System-wide constants for the garage door workspace.
//!
//! Single source of truth for pin ranges, timing bounds and default paths.

/// Lowest physical header pin number.
pub const MIN_PIN: u8 = 1;

/// Highest physical header pin number (40-pin header).
pub const MAX_PIN: u8 = 40;

/// Default physical pin for the "door open" contact sensor.
pub const DEFAULT_OPEN_PIN: u8 = 12;

/// Default physical pin for the "door closed" contact sensor.
pub const DEFAULT_CLOSE_PIN: u8 = 15;

/// Default physical pin for the door relay.
pub const DEFAULT_RELAY_PIN: u8 = 13;

/// Shortest allowed relay pulse in milliseconds.
pub const MIN_OPENCLOSE_TIMEOUT_MS: u64 = 100;

/// Longest allowed relay pulse in milliseconds.
pub const MAX_OPENCLOSE_TIMEOUT_MS: u64 = 1000;

/// Default relay pulse in milliseconds.
pub const DEFAULT_OPENCLOSE_TIMEOUT_MS: u64 = 400;

/// Shortest allowed heartbeat interval in milliseconds.
pub const MIN_HEARTBEAT_INTERVAL_MS: u64 = 100;

/// Longest allowed heartbeat interval in milliseconds.
pub const MAX_HEARTBEAT_INTERVAL_MS: u64 = 5000;

/// Default heartbeat interval in milliseconds.
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 500;

/// Default door name.
pub const DEFAULT_DOOR_NAME: &str = "Garage Door";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/garage/garage.toml";

/// Physical header pin → BCM GPIO number for the 40-pin Raspberry Pi header.
///
/// Index 0 is unused. `None` marks power and ground positions.
pub const PHYSICAL_TO_BCM: [Option<u8>; 41] = [
    None,     // 0 (unused)
    None,     // 1  3V3
    None,     // 2  5V
    Some(2),  // 3
    None,     // 4  5V
    Some(3),  // 5
    None,     // 6  GND
    Some(4),  // 7
    Some(14), // 8
    None,     // 9  GND
    Some(15), // 10
    Some(17), // 11
    Some(18), // 12
    Some(27), // 13
    None,     // 14 GND
    Some(22), // 15
    Some(23), // 16
    None,     // 17 3V3
    Some(24), // 18
    Some(10), // 19
    None,     // 20 GND
    Some(9),  // 21
    Some(25), // 22
    Some(11), // 23
    Some(8),  // 24
    None,     // 25 GND
    Some(7),  // 26
    Some(0),  // 27
    Some(1),  // 28
    Some(5),  // 29
    None,     // 30 GND
    Some(6),  // 31
    Some(12), // 32
    Some(13), // 33
    None,     // 34 GND
    Some(19), // 35
    Some(16), // 36
    Some(26), // 37
    Some(20), // 38
    None,     // 39 GND
    Some(21), // 40
];

/// Resolve a physical header pin to its BCM GPIO number.
///
/// Returns `None` for out-of-range pins and for power/ground positions.
pub fn bcm_for_physical(pin: u8) -> Option<u8> {
    PHYSICAL_TO_BCM.get(pin as usize).copied().flatten()
}
