//! Port registry for door I/O backends.
//!
//! Provides a `PortRegistry` struct for registering and retrieving
//! `SensorPort` factories by name. Constructed at startup and passed by
//! value. No global state.

use crate::port::{HalError, PortFactory, SensorPort};
use garage_common::door::config::DoorConfig;
use std::collections::HashMap;
use tracing::debug;

/// Registry of available port backends.
pub struct PortRegistry {
    factories: HashMap<&'static str, PortFactory>,
}

impl PortRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding every backend compiled into this build.
    pub fn with_builtin_ports() -> Self {
        let mut registry = Self::new();
        crate::drivers::register_all_ports(&mut registry);
        registry
    }

    /// Register a port factory.
    ///
    /// # Panics
    /// Panics if a port with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: PortFactory) {
        if self.factories.contains_key(name) {
            panic!("Port '{name}' is already registered");
        }
        debug!("Registered port backend '{}'", name);
        self.factories.insert(name, factory);
    }

    /// Get a port factory by name.
    pub fn get_factory(&self, name: &str) -> Option<PortFactory> {
        self.factories.get(name).copied()
    }

    /// Create a port instance by name.
    ///
    /// # Errors
    /// Returns `HalError::PortNotFound` if no port with the given name is registered.
    pub fn create_port(
        &self,
        name: &str,
        config: &DoorConfig,
    ) -> Result<Box<dyn SensorPort>, HalError> {
        let factory = self
            .get_factory(name)
            .ok_or_else(|| HalError::PortNotFound(name.to_string()))?;
        Ok(factory(config))
    }

    /// List all registered port names.
    pub fn list_ports(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for PortRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::simulation::SimulatedPort;

    fn create_test_port(config: &DoorConfig) -> Box<dyn SensorPort> {
        Box::new(SimulatedPort::new(config))
    }

    #[test]
    fn registry_register_and_create() {
        let mut reg = PortRegistry::new();
        reg.register("test_port", create_test_port);

        let port = reg
            .create_port("test_port", &DoorConfig::default())
            .expect("should create");
        assert_eq!(port.name(), "simulation");
    }

    #[test]
    fn registry_port_not_found() {
        let reg = PortRegistry::new();
        let result = reg.create_port("nonexistent", &DoorConfig::default());
        assert!(matches!(result, Err(HalError::PortNotFound(_))));
    }

    #[test]
    fn builtin_registry_has_simulation() {
        let reg = PortRegistry::with_builtin_ports();
        assert!(reg.list_ports().contains(&"simulation"));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn registry_duplicate_panics() {
        let mut reg = PortRegistry::new();
        reg.register("dup", create_test_port);
        reg.register("dup", create_test_port);
    }
}
