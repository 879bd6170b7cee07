use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConfigError, Result};

/// Declares a symbolic stand-in for a constructor reference. Each variant
/// round-trips through its display name.
macro_rules! symbolic_kind {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name the downstream constructor is registered under
            pub fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|kind| kind.name() == s)
                    .ok_or_else(|| {
                        ConfigError::invalid_value($what.to_string(), format!("unknown {} '{}'", $what, s))
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }
    };
}

symbolic_kind! {
    /// Agent implementations a bundle can select
    AgentKind, "agent" {
        /// Option-critic agent
        Aoc => "AOCAgent",
        /// Plain actor-critic policy agent
        Ac => "ACAgent",
        TabularSf => "TabSFAgent",
        AcSf => "ACSFAgent",
        AcOption => "ACOptionAgent",
        AcMatrix => "ACMatrixAgent",
        LinearSf => "LinearSFAgent",
        Dif => "DIFAgent",
        /// Successor-feature agent
        Sf => "SFAgent",
    }
}

symbolic_kind! {
    /// Network architectures a bundle can select
    NetworkKind, "network" {
        Aoc => "AOCNetwork",
        Sf => "SFNetwork",
        Ac => "ACNetwork",
        LinearSf => "LinearSFNetwork",
        Dif => "DIFNetwork",
    }
}

symbolic_kind! {
    /// Gradient optimizers, named the way the network builders expect
    OptimizerKind, "optimizer" {
        Adam => "AdamOptimizer",
        RMSProp => "RMSPropOptimizer",
        SGD => "GradientDescentOptimizer",
    }
}

symbolic_kind! {
    /// Environment constructors
    EnvKind, "environment" {
        /// Grid world loaded from an `.mdp` layout file
        GridWorld => "GridWorld",
        GridWorldNonMatching => "Gridworld_NonMatching",
    }
}

/// An environment constructor with its bound arguments.
///
/// Calling the constructor is left to the driver; an `EnvSpec` only records which
/// environment to build and which layout file to hand it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnvSpec {
    pub kind: EnvKind,
    pub mdp_path: Option<PathBuf>,
}

impl EnvSpec {
    pub fn new(kind: EnvKind) -> Self {
        EnvSpec { kind, mdp_path: None }
    }

    /// Grid world bound to an `.mdp` layout file
    pub fn grid_world<P: Into<PathBuf>>(mdp_path: P) -> Self {
        EnvSpec::new(EnvKind::GridWorld).with_mdp(mdp_path)
    }

    pub fn with_mdp<P: Into<PathBuf>>(mut self, mdp_path: P) -> Self {
        self.mdp_path = Some(mdp_path.into());
        self
    }

    pub fn mdp_path(&self) -> Option<&Path> {
        self.mdp_path.as_deref()
    }
}

impl fmt::Display for EnvSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mdp_path {
            Some(path) => write!(f, "{}({})", self.kind, path.display()),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for EnvSpec {
    type Err = ConfigError;

    /// Accepts `Kind` or `Kind:path`
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once(':') {
            Some((kind, path)) if !path.trim().is_empty() => {
                Ok(EnvSpec::new(kind.parse()?).with_mdp(path.trim()))
            }
            Some((kind, _)) => Ok(EnvSpec::new(kind.parse()?)),
            None => Ok(EnvSpec::new(s.parse()?)),
        }
    }
}
