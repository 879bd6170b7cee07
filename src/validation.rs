//! Opt-in semantic checks.
//!
//! Retrieval never validates; drivers that want to fail fast on a hand-edited
//! or overridden bundle call [`validate`] before building anything. Only keys
//! present in the bundle are checked.

use crate::bundle::ConfigBundle;
use crate::error::{ConfigError, Result};
use crate::types::Value;

/// Settings that must lie in `[0, 1]`
const PROBABILITY_KEYS: &[&str] = &[
    "discount",
    "initial_random_action_prob",
    "final_random_action_prob",
];

/// Counts that must be at least one
const POSITIVE_COUNT_KEYS: &[&str] = &[
    "num_agents",
    "eval_episodes",
    "max_length",
    "history_size",
    "nb_options",
    "steps",
    "sf_transition_matrix_size",
];

/// Suffixes of count settings that must be at least one
const POSITIVE_COUNT_SUFFIXES: &[&str] = &["_steps", "_interval", "_update_freq"];

/// Rates, coefficients and costs that must not be negative
const NON_NEGATIVE_KEYS: &[&str] = &["lr", "sf_lr", "gradient_clip_value"];

const NON_NEGATIVE_SUFFIXES: &[&str] = &["_coef", "_cost"];

fn matches_key(key: &str, exact: &[&str], suffixes: &[&str]) -> bool {
    exact.contains(&key) || suffixes.iter().any(|suffix| key.ends_with(suffix))
}

fn number(key: &str, value: &Value) -> Result<f64> {
    value
        .as_float()
        .ok_or_else(|| ConfigError::type_mismatch(key, "number", value.type_name()))
}

/// Check every present setting against its semantic range
pub fn validate(bundle: &ConfigBundle) -> Result<()> {
    for (key, value) in bundle.iter() {
        if PROBABILITY_KEYS.contains(&key) {
            let p = number(key, value)?;
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::invalid_value(key.to_string(), format!("{} is not in [0, 1]", p)));
            }
        } else if matches_key(key, POSITIVE_COUNT_KEYS, POSITIVE_COUNT_SUFFIXES) {
            let count = value
                .as_int()
                .ok_or_else(|| ConfigError::type_mismatch(key, "int", value.type_name()))?;
            if count < 1 {
                return Err(ConfigError::invalid_value(key.to_string(), format!("{} must be positive", count)));
            }
        } else if matches_key(key, NON_NEGATIVE_KEYS, NON_NEGATIVE_SUFFIXES) {
            let x = number(key, value)?;
            if !x.is_finite() || x < 0.0 {
                return Err(ConfigError::invalid_value(key.to_string(), format!("{} must be non-negative", x)));
            }
        }

        match value {
            Value::Tuple(sizes) if key == "input_size" || key.ends_with("_layers") => {
                if key == "input_size" && sizes.len() != 2 {
                    return Err(ConfigError::invalid_value(
                        key.to_string(),
                        format!("expected (height, width), got {} entries", sizes.len()),
                    ));
                }
                if sizes.is_empty() {
                    return Err(ConfigError::invalid_value(key.to_string(), "at least one layer size is required".to_string()));
                }
                if let Some(size) = sizes.iter().find(|&&size| size < 1) {
                    return Err(ConfigError::invalid_value(key.to_string(), format!("size {} must be positive", size)));
                }
            }
            Value::Layers(layers) => {
                if let Some(dim) = layers.iter().flatten().find(|&&dim| dim < 0) {
                    return Err(ConfigError::invalid_value(key.to_string(), format!("layer dimension {} is negative", dim)));
                }
            }
            Value::Summaries(summaries) => {
                summaries.compile()?;
            }
            _ => {}
        }
    }

    if let (Some(min), Some(max)) = (
        bundle.get_opt::<i64>("min_update_freq")?,
        bundle.get_opt::<i64>("max_update_freq")?,
    ) {
        if min > max {
            return Err(ConfigError::invalid_value(
                "min_update_freq".to_string(),
                format!("{} exceeds max_update_freq {}", min, max),
            ));
        }
    }

    tracing::trace!(settings = bundle.len(), "config bundle validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn test_presets_are_valid() {
        for (name, producer) in presets::PRESETS {
            assert!(validate(&producer()).is_ok(), "preset {} failed validation", name);
        }
    }

    #[test]
    fn test_probability_out_of_range() {
        let mut bundle = presets::aoc();
        bundle.insert("final_random_action_prob", 1.5);
        let err = validate(&bundle).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "final_random_action_prob"));
    }

    #[test]
    fn test_counts_must_be_positive() {
        let mut bundle = presets::ac();
        bundle.insert("eval_interval", 0i64);
        assert!(validate(&bundle).is_err());

        let mut bundle = presets::ac();
        bundle.insert("policy_steps", 1e3);
        assert!(matches!(validate(&bundle), Err(ConfigError::TypeMismatch { .. })));
    }

    #[test]
    fn test_costs_non_negative() {
        let mut bundle = presets::aoc();
        bundle.insert("delib_cost", -0.1);
        assert!(validate(&bundle).is_err());

        bundle.insert("delib_cost", 0.02);
        assert!(validate(&bundle).is_ok());
    }

    #[test]
    fn test_update_freq_order() {
        let mut bundle = presets::sf();
        bundle.insert("min_update_freq", 50i64);
        let err = validate(&bundle).unwrap_err();
        assert!(err.to_string().contains("max_update_freq"));
    }

    #[test]
    fn test_bad_layer_sizes() {
        let mut bundle = presets::linear();
        bundle.insert("fc_layers", Value::tuple([0]));
        assert!(validate(&bundle).is_err());

        let mut bundle = presets::aoc();
        bundle.insert("deconv_layers", Value::layers(vec![vec![4, 2, -1, 64]]));
        assert!(validate(&bundle).is_err());
    }

    #[test]
    fn test_empty_and_misshapen_sizes() {
        let mut bundle = presets::ac();
        bundle.apply_override("fc_layers", "()").unwrap();
        assert_eq!(bundle["fc_layers"], Value::tuple([]));
        let err = validate(&bundle).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "fc_layers"));

        let mut bundle = presets::aoc();
        bundle.insert("input_size", Value::tuple([13, 13, 3]));
        let err = validate(&bundle).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "input_size"));

        bundle.insert("input_size", Value::tuple([]));
        assert!(validate(&bundle).is_err());
    }

    #[test]
    fn test_bad_summary_pattern() {
        let mut summaries = crate::summaries::WeightSummaries::standard();
        summaries.insert("broken", "[");
        let mut bundle = presets::aoc();
        bundle.insert("weight_summaries", summaries);
        assert!(matches!(validate(&bundle), Err(ConfigError::InvalidPattern { .. })));
    }
}
