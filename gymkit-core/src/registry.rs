//! Explicit simulator registry

use std::collections::HashMap;

use crate::{EnvConfig, GymError, Result, Simulator};

/// Factory producing a fresh simulator session from a configuration
pub type SimulatorFactory = Box<dyn Fn(&EnvConfig) -> Result<Box<dyn Simulator>> + Send + Sync>;

/// Registry mapping environment identifiers to simulator factories.
///
/// A registry is an explicit value passed to the environment wrapper at
/// construction; there is no global registry.
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, SimulatorFactory>,
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a simulator factory under an identifier.
    ///
    /// Registering the same identifier twice replaces the factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&EnvConfig) -> Result<Box<dyn Simulator>> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(name = %name, "registering simulator factory");
        self.factories.insert(name, Box::new(factory));
    }

    /// Create a simulator session by identifier
    pub fn create(&self, name: &str, config: &EnvConfig) -> Result<Box<dyn Simulator>> {
        let factory = self.factories.get(name).ok_or_else(|| {
            GymError::Initialization(format!("Unknown environment: {}", name))
        })?;
        tracing::debug!(name = %name, "creating simulator session");
        factory(config)
    }

    /// Whether an identifier is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered identifiers, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ChainSim;
    use crate::GymError;

    #[test]
    fn create_resolves_registered_names() {
        let mut registry = Registry::new();
        registry.register("Chain-v0", |_config| Ok(Box::new(ChainSim::new(4, 2)) as Box<dyn crate::Simulator>));

        assert!(registry.contains("Chain-v0"));
        assert_eq!(registry.names(), vec!["Chain-v0".to_string()]);
        assert!(registry.create("Chain-v0", &EnvConfig::default()).is_ok());
    }

    #[test]
    fn create_fails_for_unknown_names() {
        let registry = Registry::new();
        let err = registry
            .create("Nope-v0", &EnvConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, GymError::Initialization(_)));
    }
}
