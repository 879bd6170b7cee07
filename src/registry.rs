//! Name → bundle lookup.
//!
//! The registry stores zero-argument producers, never built bundles, so every
//! lookup constructs an independent bundle and nothing accumulates between
//! calls.

use crate::bundle::ConfigBundle;
use crate::error::{ConfigError, Result};
use crate::presets::{self, Producer};

/// Mapping from bundle name to the function that builds it
#[derive(Debug, Clone, Default)]
pub struct Registry {
    producers: Vec<(String, Producer)>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Registry { producers: Vec::new() }
    }

    /// Registry holding every preset, including `default`
    pub fn standard() -> Self {
        let mut registry = Registry::new();
        for (name, producer) in presets::PRESETS {
            registry.register(name, producer);
        }
        registry
    }

    /// Register a producer under `name`, replacing and returning any
    /// producer already registered there
    pub fn register<S: Into<String>>(&mut self, name: S, producer: Producer) -> Option<Producer> {
        let name = name.into();
        match self.producers.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, producer)),
            None => {
                self.producers.push((name, producer));
                None
            }
        }
    }

    /// Registered names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.producers.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.producers.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Build the bundle registered under `name`
    pub fn get(&self, name: &str) -> Result<ConfigBundle> {
        match self.producers.iter().find(|(n, _)| n == name) {
            Some((_, producer)) => {
                let bundle = producer();
                tracing::debug!(name, settings = bundle.len(), "built config bundle");
                Ok(bundle)
            }
            None => {
                tracing::warn!(name, "unknown config bundle");
                Err(ConfigError::UnknownConfig {
                    name: name.to_string(),
                    available: self.names().into_iter().map(str::to_string).collect(),
                })
            }
        }
    }
}

/// The baseline bundle every variant derives from
pub fn get_base() -> ConfigBundle {
    presets::default()
}

/// Look up a bundle in the standard registry
pub fn get_bundle(name: &str) -> Result<ConfigBundle> {
    Registry::standard().get(name)
}

/// Names in the standard registry
pub fn bundle_names() -> Vec<&'static str> {
    presets::PRESETS.iter().map(|(name, _)| *name).collect()
}
