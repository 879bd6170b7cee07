//! Weight summary selectors.
//!
//! A summary table maps a label (`conv`, `fc`, ...) to a regex over
//! parameter names. Summary writers use it to pick which parameter subsets
//! get histogram summaries.

use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{ConfigError, Result};

/// Ordered `label -> pattern` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightSummaries {
    entries: Vec<(String, String)>,
}

impl WeightSummaries {
    pub fn new() -> Self {
        WeightSummaries { entries: Vec::new() }
    }

    /// The table every agent variant summarizes with
    pub fn standard() -> Self {
        [
            ("all", r".*"),
            ("conv", r".*/conv/.*"),
            ("fc", r".*/fc/.*"),
            ("term", r".*/option_term/.*"),
            ("q_val", r".*/q_val/.*"),
            ("policy", r".*/i_o_policies/.*"),
        ]
        .into_iter()
        .collect()
    }

    /// Insert or replace a label, returning the previous pattern
    pub fn insert<L: Into<String>, P: Into<String>>(&mut self, label: L, pattern: P) -> Option<String> {
        let label = label.into();
        let pattern = pattern.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => Some(std::mem::replace(existing, pattern)),
            None => {
                self.entries.push((label, pattern));
                None
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, pattern)| pattern.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(label, pattern)| (label.as_str(), pattern.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compile every pattern, failing on the first invalid one.
    ///
    /// Patterns are anchored at the start of the parameter name.
    pub fn compile(&self) -> Result<CompiledSummaries> {
        let entries = self
            .entries
            .iter()
            .map(|(label, pattern)| {
                Regex::new(&format!("^(?:{})", pattern))
                    .map(|regex| (label.clone(), regex))
                    .map_err(|e| ConfigError::InvalidPattern {
                        label: label.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(CompiledSummaries { entries })
    }
}

impl<L: Into<String>, P: Into<String>> FromIterator<(L, P)> for WeightSummaries {
    fn from_iter<I: IntoIterator<Item = (L, P)>>(iter: I) -> Self {
        let mut summaries = WeightSummaries::new();
        for (label, pattern) in iter {
            summaries.insert(label, pattern);
        }
        summaries
    }
}

impl fmt::Display for WeightSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (label, pattern)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", label, pattern)?;
        }
        write!(f, "}}")
    }
}

impl Serialize for WeightSummaries {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, pattern) in &self.entries {
            map.serialize_entry(label, pattern)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeightSummaries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SummariesVisitor;

        impl<'de> Visitor<'de> for SummariesVisitor {
            type Value = WeightSummaries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of label to regex pattern")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut summaries = WeightSummaries::new();
                while let Some((label, pattern)) = access.next_entry::<String, String>()? {
                    summaries.insert(label, pattern);
                }
                Ok(summaries)
            }
        }

        deserializer.deserialize_map(SummariesVisitor)
    }
}

/// Weight summaries with their patterns compiled
#[derive(Debug, Clone)]
pub struct CompiledSummaries {
    entries: Vec<(String, Regex)>,
}

impl CompiledSummaries {
    /// Whether `name` falls under `label`. Unknown labels match nothing.
    pub fn is_match(&self, label: &str, name: &str) -> bool {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map_or(false, |(_, regex)| regex.is_match(name))
    }

    /// Parameter names selected by `label`, or `None` for an unknown label
    pub fn select<'a, I>(&self, label: &str, names: I) -> Option<Vec<&'a str>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (_, regex) = self.entries.iter().find(|(l, _)| l == label)?;
        Some(names.into_iter().filter(|name| regex.is_match(name)).collect())
    }

    /// Every label whose pattern selects `name`
    pub fn labels_for(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, regex)| regex.is_match(name))
            .map(|(label, _)| label.as_str())
            .collect()
    }
}
