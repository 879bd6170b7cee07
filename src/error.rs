use std::fmt;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main error type for the configuration registry
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Requested bundle name is not registered
    UnknownConfig {
        name: String,
        available: Vec<String>,
    },

    /// Key not present in the bundle
    MissingKey(String),

    /// Key present but holding a different kind of value
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    /// Value has the right kind but is out of range or unparsable
    InvalidValue {
        key: String,
        reason: String,
    },

    /// Weight summary pattern is not a valid regex
    InvalidPattern {
        label: String,
        reason: String,
    },

    /// No constructor registered for a symbolic kind
    UnregisteredConstructor(String),

    /// Serialization/deserialization errors
    SerializationError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownConfig { name, available } => {
                write!(f, "Unknown config '{}' (available: {})", name, available.join(", "))
            }
            ConfigError::MissingKey(key) => write!(f, "Missing key '{}'", key),
            ConfigError::TypeMismatch { key, expected, actual } => {
                write!(f, "Type mismatch for '{}': expected {}, got {}", key, expected, actual)
            }
            ConfigError::InvalidValue { key, reason } => {
                write!(f, "Invalid value for '{}': {}", key, reason)
            }
            ConfigError::InvalidPattern { label, reason } => {
                write!(f, "Invalid weight summary pattern '{}': {}", label, reason)
            }
            ConfigError::UnregisteredConstructor(kind) => {
                write!(f, "No constructor registered for {}", kind)
            }
            ConfigError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::SerializationError(err.to_string())
    }
}

// Helper functions for common error patterns
impl ConfigError {
    pub fn type_mismatch<S: Into<String>>(key: S, expected: S, actual: S) -> Self {
        ConfigError::TypeMismatch {
            key: key.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_value<S: Into<String>>(key: S, reason: S) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_config_lists_available() {
        let err = ConfigError::UnknownConfig {
            name: "nope".to_string(),
            available: vec!["aoc".to_string(), "sf".to_string()],
        };
        assert_eq!(err.to_string(), "Unknown config 'nope' (available: aoc, sf)");
    }

    #[test]
    fn test_from_serde_json() {
        let err: ConfigError = serde_json::from_str::<Vec<i64>>("[1,").unwrap_err().into();
        assert!(matches!(err, ConfigError::SerializationError(_)));
    }
}
