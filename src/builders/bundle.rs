use crate::bundle::ConfigBundle;
use crate::types::Value;

/// Builder for constructing config bundles with a fluent API
///
/// Starting from a base bundle and setting keys on top of it is the
/// struct-update form of an override merge: keys set here win over the
/// base, keys not set are inherited.
#[derive(Debug, Clone, Default)]
pub struct BundleBuilder {
    bundle: ConfigBundle,
}

impl BundleBuilder {
    /// Create a builder with no settings
    pub fn new() -> Self {
        BundleBuilder {
            bundle: ConfigBundle::new(),
        }
    }

    /// Create a builder that inherits every setting of `base`
    pub fn from_base(base: ConfigBundle) -> Self {
        BundleBuilder { bundle: base }
    }

    /// Set or override a single setting
    pub fn set<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.bundle.insert(key, value);
        self
    }

    /// Apply every setting of `overrides` on top of the current ones
    pub fn merge(mut self, overrides: ConfigBundle) -> Self {
        self.bundle = ConfigBundle::merge(self.bundle, overrides);
        self
    }

    /// Build the bundle
    pub fn build(self) -> ConfigBundle {
        self.bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentKind;

    #[test]
    fn test_bundle_builder() {
        let bundle = BundleBuilder::new()
            .set("num_agents", 8i64)
            .set("use_gpu", false)
            .set("agent", AgentKind::Aoc)
            .build();

        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.get::<AgentKind>("agent").unwrap(), AgentKind::Aoc);
    }

    #[test]
    fn test_builder_from_base_overrides() {
        let base = BundleBuilder::new().set("use_gpu", true).set("max_length", 100i64).build();
        let bundle = BundleBuilder::from_base(base.clone())
            .set("use_gpu", false)
            .set("lr", 1e-3)
            .build();

        assert_eq!(bundle.keys().collect::<Vec<_>>(), vec!["use_gpu", "max_length", "lr"]);
        assert_eq!(bundle.get::<bool>("use_gpu").unwrap(), false);
        assert_eq!(base.get::<bool>("use_gpu").unwrap(), true);
    }

    #[test]
    fn test_builder_merge() {
        let overrides = BundleBuilder::new().set("max_length", 50i64).build();
        let bundle = BundleBuilder::new()
            .set("max_length", 100i64)
            .merge(overrides)
            .build();
        assert_eq!(bundle.get::<i64>("max_length").unwrap(), 50);
    }
}
