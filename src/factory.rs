//! Constructor registry.
//!
//! Bundles name agents, networks and environments through symbolic kinds.
//! A driver registers one constructor per kind it supports and resolves the
//! kinds found in a bundle here, at the point of construction.
//!
//! ```
//! use agent_configs::factory::ConstructorRegistry;
//! use agent_configs::registry::get_bundle;
//! use agent_configs::types::NetworkKind;
//!
//! let mut networks: ConstructorRegistry<NetworkKind, String> = ConstructorRegistry::new();
//! networks.register(NetworkKind::Aoc, |bundle| {
//!     let history: usize = bundle.get("history_size")?;
//!     Ok(format!("aoc network over {} frames", history))
//! });
//!
//! let bundle = get_bundle("aoc").unwrap();
//! let network = networks.build_from(&bundle, "network").unwrap();
//! assert_eq!(network, "aoc network over 3 frames");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::bundle::ConfigBundle;
use crate::error::{ConfigError, Result};
use crate::types::FromValue;

type Constructor<T> = Box<dyn Fn(&ConfigBundle) -> Result<T> + Send + Sync>;

/// Maps each symbolic kind to the function that builds it
pub struct ConstructorRegistry<K, T> {
    constructors: HashMap<K, Constructor<T>>,
}

impl<K, T> ConstructorRegistry<K, T>
where
    K: Copy + Eq + Hash + fmt::Display,
{
    pub fn new() -> Self {
        ConstructorRegistry {
            constructors: HashMap::new(),
        }
    }

    /// Register the constructor for `kind`, replacing any previous one
    pub fn register<F>(&mut self, kind: K, constructor: F) -> &mut Self
    where
        F: Fn(&ConfigBundle) -> Result<T> + Send + Sync + 'static,
    {
        self.constructors.insert(kind, Box::new(constructor));
        self
    }

    pub fn contains(&self, kind: K) -> bool {
        self.constructors.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Build `kind`, handing the constructor the whole bundle
    pub fn build(&self, kind: K, bundle: &ConfigBundle) -> Result<T> {
        let constructor = self
            .constructors
            .get(&kind)
            .ok_or_else(|| ConfigError::UnregisteredConstructor(kind.to_string()))?;
        tracing::debug!(%kind, "constructing from config bundle");
        constructor(bundle)
    }

    /// Read the kind stored under `key` and build it
    pub fn build_from(&self, bundle: &ConfigBundle, key: &str) -> Result<T>
    where
        K: FromValue,
    {
        let kind: K = bundle.get(key)?;
        self.build(kind, bundle)
    }
}

impl<K, T> Default for ConstructorRegistry<K, T>
where
    K: Copy + Eq + Hash + fmt::Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Display, T> fmt::Debug for ConstructorRegistry<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<String> = self.constructors.keys().map(|k| k.to_string()).collect();
        kinds.sort();
        f.debug_struct("ConstructorRegistry").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::types::{AgentKind, EnvKind, EnvSpec};
    use std::path::PathBuf;

    #[derive(Debug, PartialEq)]
    struct GridWorld {
        layout: PathBuf,
        max_length: usize,
    }

    fn envs() -> ConstructorRegistry<EnvKind, GridWorld> {
        let mut envs = ConstructorRegistry::new();
        envs.register(EnvKind::GridWorld, |bundle| {
            let spec: EnvSpec = bundle.get("env")?;
            let layout = spec
                .mdp_path()
                .ok_or_else(|| ConfigError::invalid_value("env", "grid world needs a layout file"))?
                .to_path_buf();
            Ok(GridWorld {
                layout,
                max_length: bundle.get("max_length")?,
            })
        });
        envs
    }

    #[test]
    fn test_build_env_from_bundle() {
        let env = envs().build_from(&presets::ac(), "env").unwrap();
        assert_eq!(
            env,
            GridWorld {
                layout: PathBuf::from("./mdps/2rooms.mdp"),
                max_length: 100,
            }
        );
    }

    #[test]
    fn test_unregistered_kind() {
        let mut bundle = presets::aoc();
        bundle.insert("env", EnvSpec::new(EnvKind::GridWorldNonMatching));
        let err = envs().build_from(&bundle, "env").unwrap_err();
        assert_eq!(err, ConfigError::UnregisteredConstructor("Gridworld_NonMatching".to_string()));
    }

    #[test]
    fn test_every_ac_agent_resolves() {
        let mut agents: ConstructorRegistry<AgentKind, &'static str> = ConstructorRegistry::new();
        for kind in AgentKind::ALL {
            agents.register(*kind, move |_| Ok(kind.name()));
        }
        assert_eq!(agents.len(), AgentKind::ALL.len());

        let bundle = presets::ac();
        let built: Vec<&str> = bundle
            .agents()
            .into_iter()
            .map(|(_, kind)| agents.build(kind, &bundle).unwrap())
            .collect();
        assert_eq!(built[0], "ACAgent");
        assert_eq!(built.len(), 6);
    }
}
