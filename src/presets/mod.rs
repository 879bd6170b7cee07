//! # Presets
//!
//! Literal hyperparameter tables for every agent variant. Each variant is
//! the shared [`default`] bundle with its own settings layered on top:
//!
//! | Name | Agents | Network | Environment |
//! |------|--------|---------|-------------|
//! | `aoc` | `AOCAgent` | `AOCNetwork` | 4rooms |
//! | `sf` | `SFAgent` | `SFNetwork` | toy |
//! | `ac` | AC policy/SF/option/matrix/tabular/linear agents | `ACNetwork` | 2rooms |
//! | `linear` | `LinearSFAgent` | `LinearSFNetwork` | 2rooms |
//! | `linear_4rooms` | `LinearSFAgent` | `LinearSFNetwork` | 4rooms |
//! | `dif_4rooms` | `DIFAgent` | `DIFNetwork` | 4rooms |
//!
//! Step counts are integers throughout.

mod actor_critic;
mod option_critic;

pub use actor_critic::{ac, dif_4rooms, linear, linear_4rooms};
pub use option_critic::{aoc, sf};

use crate::bundle::ConfigBundle;

/// Produces a fresh bundle on every call
pub type Producer = fn() -> ConfigBundle;

/// Every preset, base first
pub const PRESETS: [(&str, Producer); 7] = [
    ("default", default),
    ("aoc", aoc),
    ("sf", sf),
    ("ac", ac),
    ("linear", linear),
    ("linear_4rooms", linear_4rooms),
    ("dif_4rooms", dif_4rooms),
];

/// Baseline settings every variant inherits
pub fn default() -> ConfigBundle {
    config_bundle! {
        num_agents: 8,
        eval_episodes: 1,
        use_gpu: false,
        max_length: 100,
    }
}
