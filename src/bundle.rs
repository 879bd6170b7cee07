use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Index;

use crate::error::{ConfigError, Result};
use crate::types::{AgentKind, FromValue, Value};

/// An ordered mapping from setting name to value.
///
/// Keys are unique. Inserting an existing key replaces its value without
/// moving it, so a variant built on top of a base bundle lists the base keys
/// first, in base order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigBundle {
    entries: Vec<(String, Value)>,
}

impl ConfigBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        ConfigBundle { entries: Vec::new() }
    }

    /// Override merge: start from `base`, then apply every key of `overrides`.
    ///
    /// Values are replaced wholesale; tuples and summary tables are never
    /// merged element-wise.
    pub fn merge(base: ConfigBundle, overrides: ConfigBundle) -> ConfigBundle {
        let mut merged = base;
        for (key, value) in overrides.entries {
            merged.insert(key, value);
        }
        merged
    }

    /// Insert or replace a setting, returning the previous value
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Typed lookup of a required setting
    pub fn get<T: FromValue>(&self, key: &str) -> Result<T> {
        let value = self
            .get_value(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        T::from_value(key, value)
    }

    /// Typed lookup of an optional setting. A missing key is `Ok(None)`; a
    /// key holding the wrong kind of value is still an error.
    pub fn get_opt<T: FromValue>(&self, key: &str) -> Result<Option<T>> {
        self.get_value(key)
            .map(|value| T::from_value(key, value))
            .transpose()
    }

    /// Every agent-valued setting, in bundle order
    pub fn agents(&self) -> Vec<(&str, AgentKind)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_agent().map(|kind| (k.as_str(), kind)))
            .collect()
    }

    /// Override an existing setting from its textual form.
    ///
    /// The text is parsed as the same kind of value the key already holds.
    /// Unknown keys are rejected.
    pub fn apply_override(&mut self, key: &str, raw: &str) -> Result<()> {
        let current = self
            .get_value(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        let parsed = current.parse_as(key, raw)?;
        tracing::debug!(key, from = %current, to = %parsed, "applying override");
        self.insert(key, parsed);
        Ok(())
    }

    /// Apply a list of `key=value` assignments in order.
    ///
    /// All or nothing: if any assignment fails the bundle is left unchanged.
    pub fn apply_overrides<I, S>(&mut self, assignments: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut staged = self.clone();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (key, raw) = assignment.split_once('=').ok_or_else(|| {
                ConfigError::invalid_value(assignment.to_string(), "expected key=value".to_string())
            })?;
            staged.apply_override(key.trim(), raw)?;
        }
        *self = staged;
        Ok(())
    }

    /// Pretty JSON object, keys in bundle order
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Run the semantic checks in [`crate::validation`]
    pub fn validate(&self) -> Result<()> {
        crate::validation::validate(self)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ConfigBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bundle = ConfigBundle::new();
        for (key, value) in iter {
            bundle.insert(key, value);
        }
        bundle
    }
}

impl Index<&str> for ConfigBundle {
    type Output = Value;

    /// Panics if the key is absent
    fn index(&self, key: &str) -> &Value {
        self.get_value(key)
            .unwrap_or_else(|| panic!("no setting '{}' in config bundle", key))
    }
}

impl fmt::Display for ConfigBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.keys().map(str::len).max().unwrap_or(0);
        for (key, value) in self.iter() {
            writeln!(f, "{:width$} = {}", key, value, width = width)?;
        }
        Ok(())
    }
}

impl Serialize for ConfigBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
