//! # Agent Configs - Hyperparameter Registry for Option-Critic and Successor-Feature Agents
//!
//! This crate holds the named hyperparameter bundles used to launch
//! reinforcement-learning experiments: actor-critic, option-critic and
//! successor-feature agent variants. A driver picks a bundle by name, reads
//! the settings it needs, and resolves the agent, network and environment
//! kinds the bundle names through its own constructors.
//!
//! ## Key Features
//!
//! - **Named Bundles**: `aoc`, `sf`, `ac`, `linear`, `linear_4rooms`, `dif_4rooms`
//! - **Override Merge**: every variant is the `default` bundle with its own keys on top
//! - **Typed Access**: `bundle.get::<f64>("discount")` with precise errors
//! - **Symbolic Constructors**: agent/network/environment kinds instead of live references
//! - **Runtime Overrides**: `key=value` strings parsed by the type already stored
//!
//! ## Quick Start
//!
//! ```rust
//! use agent_configs::registry::{get_base, get_bundle};
//! use agent_configs::settings::NetworkSettings;
//!
//! let mut bundle = get_bundle("aoc").unwrap();
//! assert_eq!(bundle.get::<f64>("discount").unwrap(), 0.985);
//!
//! // Every variant carries the base keys
//! assert!(get_base().keys().all(|key| bundle.contains_key(key)));
//!
//! // Adjust a setting from the command line form
//! bundle.apply_override("lr", "0.0007").unwrap();
//!
//! let network = NetworkSettings::from_bundle(&bundle).unwrap();
//! assert_eq!(network.input_size, (13, 13));
//! ```
//!
//! ## Module Organization
//!
//! - [`builders`] - Builder for deriving bundles from a base
//! - [`bundle`] - The ordered key/value bundle
//! - [`error`] - Error types and result handling
//! - [`factory`] - Resolving symbolic kinds to constructors
//! - [`presets`] - The literal bundle tables
//! - [`registry`] - Name to bundle lookup
//! - [`settings`] - Typed views grouped by consumer
//! - [`summaries`] - Weight summary selectors
//! - [`types`] - Setting values and symbolic kinds
//! - [`validation`] - Opt-in range checks

#[macro_use]
pub mod macros;

pub mod builders;
pub mod bundle;
pub mod error;
pub mod factory;
pub mod presets;
pub mod registry;
pub mod settings;
pub mod summaries;
pub mod types;
pub mod validation;

pub use bundle::ConfigBundle;
pub use error::{ConfigError, Result};
pub use registry::{get_base, get_bundle, Registry};
pub use types::Value;

#[cfg(test)]
mod tests;
