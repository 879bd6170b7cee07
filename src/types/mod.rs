//! Typed values a configuration setting can hold.
//!
//! Live constructor references (agent classes, network builders, bound
//! environment factories) are represented by the symbolic kinds in
//! [`kinds`] and resolved later through [`crate::factory`].

pub mod kinds;

pub use kinds::{AgentKind, EnvKind, EnvSpec, NetworkKind, OptimizerKind};

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{ConfigError, Result};
use crate::summaries::WeightSummaries;

/// Shape tuple of a single layer, e.g. `(kernel, stride, filters)`
pub type LayerSpec = Vec<i64>;

/// A single setting value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Flat tuple of numbers, e.g. `input_size` or `sf_layers`
    Tuple(Vec<i64>),
    /// Tuple of layer-shape tuples; an empty shape is allowed
    Layers(Vec<LayerSpec>),
    Summaries(WeightSummaries),
    Agent(AgentKind),
    Network(NetworkKind),
    Optimizer(OptimizerKind),
    Env(EnvSpec),
}

impl Value {
    pub fn tuple<I: IntoIterator<Item = i64>>(items: I) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    pub fn layers(layers: Vec<LayerSpec>) -> Self {
        Value::Layers(layers)
    }

    /// Short name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
            Value::Layers(_) => "layers",
            Value::Summaries(_) => "weight summaries",
            Value::Agent(_) => "agent",
            Value::Network(_) => "network",
            Value::Optimizer(_) => "optimizer",
            Value::Env(_) => "env",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats; coefficients are sometimes written as `1`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[i64]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_layers(&self) -> Option<&[LayerSpec]> {
        match self {
            Value::Layers(layers) => Some(layers),
            _ => None,
        }
    }

    pub fn as_summaries(&self) -> Option<&WeightSummaries> {
        match self {
            Value::Summaries(summaries) => Some(summaries),
            _ => None,
        }
    }

    pub fn as_agent(&self) -> Option<AgentKind> {
        match self {
            Value::Agent(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn as_network(&self) -> Option<NetworkKind> {
        match self {
            Value::Network(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn as_optimizer(&self) -> Option<OptimizerKind> {
        match self {
            Value::Optimizer(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn as_env(&self) -> Option<&EnvSpec> {
        match self {
            Value::Env(spec) => Some(spec),
            _ => None,
        }
    }

    /// Parse `raw` into a value of the same variant as `self`.
    ///
    /// Tuples accept either a JSON array or a comma-separated list; layers
    /// and weight summaries are JSON. Integer settings also accept float
    /// notation with no fractional part (`1e6`).
    pub fn parse_as(&self, key: &str, raw: &str) -> Result<Value> {
        let trimmed = raw.trim();
        let invalid = |reason: String| ConfigError::invalid_value(key.to_string(), reason);

        let parsed = match self {
            Value::Bool(_) => match trimmed.to_ascii_lowercase().as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => return Err(invalid(format!("'{}' is not a bool", trimmed))),
            },
            Value::Int(_) => Value::Int(parse_int(trimmed).map_err(invalid)?),
            Value::Float(_) => Value::Float(
                trimmed
                    .parse::<f64>()
                    .map_err(|e| invalid(format!("'{}' is not a float: {}", trimmed, e)))?,
            ),
            Value::Str(_) => Value::Str(trimmed.to_string()),
            Value::Tuple(_) => {
                if trimmed.starts_with('[') {
                    Value::Tuple(serde_json::from_str(trimmed).map_err(|e| invalid(e.to_string()))?)
                } else {
                    let items = trimmed
                        .trim_matches(|c| c == '(' || c == ')')
                        .split(',')
                        .map(str::trim)
                        .filter(|item| !item.is_empty())
                        .map(parse_int)
                        .collect::<std::result::Result<Vec<_>, _>>()
                        .map_err(invalid)?;
                    Value::Tuple(items)
                }
            }
            Value::Layers(_) => {
                Value::Layers(serde_json::from_str(trimmed).map_err(|e| invalid(e.to_string()))?)
            }
            Value::Summaries(_) => {
                Value::Summaries(serde_json::from_str(trimmed).map_err(|e| invalid(e.to_string()))?)
            }
            Value::Agent(_) => Value::Agent(trimmed.parse().map_err(|e: ConfigError| invalid(e.to_string()))?),
            Value::Network(_) => Value::Network(trimmed.parse().map_err(|e: ConfigError| invalid(e.to_string()))?),
            Value::Optimizer(_) => {
                Value::Optimizer(trimmed.parse().map_err(|e: ConfigError| invalid(e.to_string()))?)
            }
            Value::Env(_) => Value::Env(trimmed.parse().map_err(|e: ConfigError| invalid(e.to_string()))?),
        };

        Ok(parsed)
    }
}

fn parse_int(raw: &str) -> std::result::Result<i64, String> {
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    match raw.parse::<f64>() {
        Ok(x) if x.is_finite() && x.fract() == 0.0 && x.abs() <= i64::MAX as f64 => Ok(x as i64),
        _ => Err(format!("'{}' is not an integer", raw)),
    }
}

fn fmt_tuple(f: &mut fmt::Formatter<'_>, items: &[i64]) -> fmt::Result {
    match items {
        [] => write!(f, "()"),
        [single] => write!(f, "({},)", single),
        _ => {
            let joined: Vec<String> = items.iter().map(|i| i.to_string()).collect();
            write!(f, "({})", joined.join(", "))
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Tuple(items) => fmt_tuple(f, items),
            Value::Layers(layers) => {
                write!(f, "(")?;
                for (i, layer) in layers.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    fmt_tuple(f, layer)?;
                }
                if layers.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Summaries(summaries) => write!(f, "{}", summaries),
            Value::Agent(kind) => write!(f, "{}", kind),
            Value::Network(kind) => write!(f, "{}", kind),
            Value::Optimizer(kind) => write!(f, "{}", kind),
            Value::Env(spec) => write!(f, "{}", spec),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Tuple(items) => items.serialize(serializer),
            Value::Layers(layers) => layers.serialize(serializer),
            Value::Summaries(summaries) => summaries.serialize(serializer),
            Value::Agent(kind) => kind.serialize(serializer),
            Value::Network(kind) => kind.serialize(serializer),
            Value::Optimizer(kind) => kind.serialize(serializer),
            Value::Env(spec) => spec.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<WeightSummaries> for Value {
    fn from(summaries: WeightSummaries) -> Self {
        Value::Summaries(summaries)
    }
}

impl From<AgentKind> for Value {
    fn from(kind: AgentKind) -> Self {
        Value::Agent(kind)
    }
}

impl From<NetworkKind> for Value {
    fn from(kind: NetworkKind) -> Self {
        Value::Network(kind)
    }
}

impl From<OptimizerKind> for Value {
    fn from(kind: OptimizerKind) -> Self {
        Value::Optimizer(kind)
    }
}

impl From<EnvSpec> for Value {
    fn from(spec: EnvSpec) -> Self {
        Value::Env(spec)
    }
}

/// Typed extraction of a setting from a [`Value`]
pub trait FromValue: Sized {
    /// Human-readable name of the expected value kind
    const EXPECTED: &'static str;

    /// Extract from `value`, or `None` if it holds another variant
    fn extract(value: &Value) -> Option<Self>;

    fn from_value(key: &str, value: &Value) -> Result<Self> {
        Self::extract(value)
            .ok_or_else(|| ConfigError::type_mismatch(key, Self::EXPECTED, value.type_name()))
    }
}

macro_rules! impl_from_value {
    ($ty:ty, $expected:literal, $extract:expr) => {
        impl FromValue for $ty {
            const EXPECTED: &'static str = $expected;

            fn extract(value: &Value) -> Option<Self> {
                $extract(value)
            }
        }
    };
}

impl_from_value!(bool, "bool", Value::as_bool);
impl_from_value!(i64, "int", Value::as_int);
impl_from_value!(f64, "float", Value::as_float);
impl_from_value!(String, "str", |v: &Value| v.as_str().map(str::to_string));
impl_from_value!(Vec<i64>, "tuple", |v: &Value| v.as_tuple().map(<[i64]>::to_vec));
impl_from_value!(Vec<LayerSpec>, "layers", |v: &Value| v.as_layers().map(<[LayerSpec]>::to_vec));
impl_from_value!(WeightSummaries, "weight summaries", |v: &Value| v.as_summaries().cloned());
impl_from_value!(AgentKind, "agent", Value::as_agent);
impl_from_value!(NetworkKind, "network", Value::as_network);
impl_from_value!(OptimizerKind, "optimizer", Value::as_optimizer);
impl_from_value!(EnvSpec, "env", |v: &Value| v.as_env().cloned());
impl_from_value!(EnvKind, "env", |v: &Value| v.as_env().map(|spec| spec.kind));

impl FromValue for u64 {
    const EXPECTED: &'static str = "non-negative int";

    fn extract(value: &Value) -> Option<Self> {
        value.as_int().and_then(|i| u64::try_from(i).ok())
    }

    fn from_value(key: &str, value: &Value) -> Result<Self> {
        let i = i64::from_value(key, value)?;
        u64::try_from(i).map_err(|_| ConfigError::invalid_value(key.to_string(), format!("{} is negative", i)))
    }
}

impl FromValue for usize {
    const EXPECTED: &'static str = "non-negative int";

    fn extract(value: &Value) -> Option<Self> {
        value.as_int().and_then(|i| usize::try_from(i).ok())
    }

    fn from_value(key: &str, value: &Value) -> Result<Self> {
        let i = i64::from_value(key, value)?;
        usize::try_from(i).map_err(|_| ConfigError::invalid_value(key.to_string(), format!("{} is negative", i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_tuple_literals() {
        assert_eq!(Value::tuple([13, 13]).to_string(), "(13, 13)");
        assert_eq!(Value::tuple([128]).to_string(), "(128,)");
        assert_eq!(Value::layers(vec![vec![5, 2, 32]]).to_string(), "((5, 2, 32),)");
        assert_eq!(
            Value::layers(vec![vec![4, 2, 0, 128], vec![]]).to_string(),
            "((4, 2, 0, 128), ())"
        );
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
    }

    #[test]
    fn test_float_accepts_int() {
        assert_eq!(Value::Int(40).as_float(), Some(40.0));
        assert_eq!(Value::Float(0.5).as_int(), None);
    }

    #[test]
    fn test_parse_as_keeps_variant() {
        let steps = Value::Int(1_000_000);
        assert_eq!(steps.parse_as("steps", "1e5").unwrap(), Value::Int(100_000));
        assert!(steps.parse_as("steps", "0.5").is_err());

        let size = Value::tuple([13, 13]);
        assert_eq!(size.parse_as("input_size", "7,6").unwrap(), Value::tuple([7, 6]));
        assert_eq!(size.parse_as("input_size", "[16, 16]").unwrap(), Value::tuple([16, 16]));

        let agent = Value::Agent(AgentKind::Aoc);
        assert_eq!(agent.parse_as("agent", "SFAgent").unwrap(), Value::Agent(AgentKind::Sf));

        let gpu = Value::Bool(false);
        assert_eq!(gpu.parse_as("use_gpu", "True").unwrap(), Value::Bool(true));
        assert!(gpu.parse_as("use_gpu", "yes").is_err());
    }

    #[test]
    fn test_unsigned_extraction_rejects_negative() {
        let err = usize::from_value("history_size", &Value::Int(-3)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = usize::from_value("history_size", &Value::Float(3.0)).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    }
}
