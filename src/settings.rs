//! Typed views of a bundle, grouped by the component that consumes them.
//!
//! A bundle is a flat, loosely typed mapping. Construction code usually wants
//! a struct with the right field types instead; these views extract one from
//! a bundle, tolerating the keys that only some variants define.

use serde::Serialize;

use crate::bundle::ConfigBundle;
use crate::error::{ConfigError, Result};
use crate::summaries::WeightSummaries;
use crate::types::{LayerSpec, NetworkKind, OptimizerKind};

/// One convolution layer: `(kernel, stride, filters)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConvSpec {
    pub kernel: usize,
    pub stride: usize,
    pub filters: usize,
}

impl ConvSpec {
    fn from_layer(key: &str, layer: &[i64]) -> Result<Self> {
        match *layer {
            [kernel, stride, filters] => Ok(ConvSpec {
                kernel: non_negative(key, kernel)?,
                stride: non_negative(key, stride)?,
                filters: non_negative(key, filters)?,
            }),
            _ => Err(ConfigError::invalid_value(
                key.to_string(),
                format!("conv layer needs (kernel, stride, filters), got {} values", layer.len()),
            )),
        }
    }
}

fn non_negative(key: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| ConfigError::invalid_value(key.to_string(), format!("{} is negative", value)))
}

fn sizes(bundle: &ConfigBundle, key: &str) -> Result<Vec<usize>> {
    bundle
        .get::<Vec<i64>>(key)?
        .into_iter()
        .map(|size| non_negative(key, size))
        .collect()
}

fn opt_sizes(bundle: &ConfigBundle, key: &str) -> Result<Option<Vec<usize>>> {
    if bundle.contains_key(key) {
        sizes(bundle, key).map(Some)
    } else {
        Ok(None)
    }
}

/// Settings read by the network builders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSettings {
    pub network: NetworkKind,
    /// Observation height and width
    pub input_size: (usize, usize),
    /// Number of stacked frames
    pub history_size: usize,
    pub conv_layers: Vec<ConvSpec>,
    pub deconv_layers: Option<Vec<LayerSpec>>,
    pub fc_layers: Vec<usize>,
    pub sf_layers: Vec<usize>,
    pub aux_fc_layers: Option<Vec<usize>>,
    pub aux_deconv_layers: Option<Vec<LayerSpec>>,
    pub weight_summaries: WeightSummaries,
}

impl NetworkSettings {
    pub fn from_bundle(bundle: &ConfigBundle) -> Result<Self> {
        let input_size = match sizes(bundle, "input_size")?.as_slice() {
            [height, width] => (*height, *width),
            other => {
                return Err(ConfigError::invalid_value(
                    "input_size".to_string(),
                    format!("expected (height, width), got {} values", other.len()),
                ))
            }
        };

        let conv_layers = bundle
            .get::<Vec<LayerSpec>>("conv_layers")?
            .iter()
            .map(|layer| ConvSpec::from_layer("conv_layers", layer))
            .collect::<Result<Vec<_>>>()?;

        Ok(NetworkSettings {
            network: bundle.get("network")?,
            input_size,
            history_size: bundle.get("history_size")?,
            conv_layers,
            deconv_layers: bundle.get_opt("deconv_layers")?,
            fc_layers: sizes(bundle, "fc_layers")?,
            sf_layers: sizes(bundle, "sf_layers")?,
            aux_fc_layers: opt_sizes(bundle, "aux_fc_layers")?,
            aux_deconv_layers: bundle.get_opt("aux_deconv_layers")?,
            weight_summaries: bundle.get("weight_summaries")?,
        })
    }

    /// Channels of the stacked observation fed to the first conv layer
    pub fn input_channels(&self, channels_per_frame: usize) -> usize {
        self.history_size * channels_per_frame
    }
}

/// Optimizer and loss weighting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationSettings {
    pub optimizer: OptimizerKind,
    pub lr: f64,
    /// Separate rate for the successor-feature head
    pub sf_lr: Option<f64>,
    pub discount: f64,
    pub entropy_coef: f64,
    pub critic_coef: Option<f64>,
    pub sf_coef: Option<f64>,
    pub instant_r_coef: Option<f64>,
    pub option_entropy_coef: Option<f64>,
    pub auto_coef: Option<f64>,
    pub aux_coef: Option<f64>,
    pub gradient_clip_value: f64,
}

impl OptimizationSettings {
    pub fn from_bundle(bundle: &ConfigBundle) -> Result<Self> {
        Ok(OptimizationSettings {
            optimizer: bundle.get("network_optimizer")?,
            lr: bundle.get("lr")?,
            sf_lr: bundle.get_opt("sf_lr")?,
            discount: bundle.get("discount")?,
            entropy_coef: bundle.get("entropy_coef")?,
            critic_coef: bundle.get_opt("critic_coef")?,
            sf_coef: bundle.get_opt("sf_coef")?,
            instant_r_coef: bundle.get_opt("instant_r_coef")?,
            option_entropy_coef: bundle.get_opt("option_entropy_coef")?,
            auto_coef: bundle.get_opt("auto_coef")?,
            aux_coef: bundle.get_opt("aux_coef")?,
            gradient_clip_value: bundle.get("gradient_clip_value")?,
        })
    }

    /// Learning rate for the successor-feature head, falling back to `lr`
    pub fn sf_lr_or_default(&self) -> f64 {
        self.sf_lr.unwrap_or(self.lr)
    }
}

/// Random-action schedule and option switching costs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorationSettings {
    pub initial_random_action_prob: f64,
    pub final_random_action_prob: f64,
    pub explore_steps: u64,
    /// Deliberation cost charged on option switches
    pub delib_cost: f64,
    pub margin_cost: f64,
}

impl ExplorationSettings {
    pub fn from_bundle(bundle: &ConfigBundle) -> Result<Self> {
        Ok(ExplorationSettings {
            initial_random_action_prob: bundle.get("initial_random_action_prob")?,
            final_random_action_prob: bundle.get("final_random_action_prob")?,
            explore_steps: bundle.get("explore_steps")?,
            delib_cost: bundle.get("delib_cost")?,
            margin_cost: bundle.get("margin_cost")?,
        })
    }
}

/// Run length, worker count and scheduling intervals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSettings {
    pub num_agents: usize,
    pub eval_episodes: usize,
    pub use_gpu: bool,
    pub max_length: usize,
    pub nb_options: Option<usize>,
    pub steps: u64,
    pub training_steps: Option<u64>,
    pub max_update_freq: usize,
    pub min_update_freq: usize,
    pub summary_interval: u64,
    pub checkpoint_interval: u64,
    pub eval_interval: u64,
    pub policy_steps: Option<u64>,
    pub sf_transition_matrix_steps: Option<u64>,
    pub sf_transition_options_steps: Option<u64>,
    pub sf_transition_matrix_size: Option<u64>,
}

impl RunSettings {
    pub fn from_bundle(bundle: &ConfigBundle) -> Result<Self> {
        Ok(RunSettings {
            num_agents: bundle.get("num_agents")?,
            eval_episodes: bundle.get("eval_episodes")?,
            use_gpu: bundle.get("use_gpu")?,
            max_length: bundle.get("max_length")?,
            nb_options: bundle.get_opt("nb_options")?,
            steps: bundle.get("steps")?,
            training_steps: bundle.get_opt("training_steps")?,
            max_update_freq: bundle.get("max_update_freq")?,
            min_update_freq: bundle.get("min_update_freq")?,
            summary_interval: bundle.get("summary_interval")?,
            checkpoint_interval: bundle.get("checkpoint_interval")?,
            eval_interval: bundle.get("eval_interval")?,
            policy_steps: bundle.get_opt("policy_steps")?,
            sf_transition_matrix_steps: bundle.get_opt("sf_transition_matrix_steps")?,
            sf_transition_options_steps: bundle.get_opt("sf_transition_options_steps")?,
            sf_transition_matrix_size: bundle.get_opt("sf_transition_matrix_size")?,
        })
    }

    /// Steps spent training before the run switches to evaluation only
    pub fn training_steps_or_total(&self) -> u64 {
        self.training_steps.unwrap_or(self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::types::Value;

    #[test]
    fn test_network_settings_aoc() {
        let settings = NetworkSettings::from_bundle(&presets::aoc()).unwrap();
        assert_eq!(settings.network, NetworkKind::Aoc);
        assert_eq!(settings.input_size, (13, 13));
        assert_eq!(settings.conv_layers, vec![ConvSpec { kernel: 5, stride: 2, filters: 32 }]);
        assert_eq!(settings.deconv_layers.as_ref().map(Vec::len), Some(4));
        assert_eq!(settings.sf_layers, vec![256, 128, 256]);
        assert!(settings.aux_fc_layers.is_none());
        assert_eq!(settings.input_channels(3), 9);
    }

    #[test]
    fn test_network_settings_rejects_bad_shapes() {
        let mut bundle = presets::ac();
        bundle.insert("input_size", Value::tuple([7, 6, 3]));
        assert!(NetworkSettings::from_bundle(&bundle).is_err());

        let mut bundle = presets::ac();
        bundle.insert("conv_layers", Value::layers(vec![vec![5, 2]]));
        assert!(NetworkSettings::from_bundle(&bundle).is_err());
    }

    #[test]
    fn test_optimization_settings_optional_coefs() {
        let sf = OptimizationSettings::from_bundle(&presets::sf()).unwrap();
        assert_eq!(sf.critic_coef, None);
        assert_eq!(sf.sf_coef, Some(0.5));
        assert_eq!(sf.sf_lr_or_default(), 1e-3);

        let dif = OptimizationSettings::from_bundle(&presets::dif_4rooms()).unwrap();
        assert_eq!(dif.optimizer, OptimizerKind::RMSProp);
        assert_eq!(dif.aux_coef, Some(1.0));
        assert_eq!(dif.gradient_clip_value, 40.0);
    }

    #[test]
    fn test_run_settings() {
        let run = RunSettings::from_bundle(&presets::dif_4rooms()).unwrap();
        assert_eq!(run.steps, 1_000_000);
        assert_eq!(run.training_steps_or_total(), 500_000);
        assert_eq!(run.checkpoint_interval, 10);
        assert_eq!(run.sf_transition_matrix_steps, None);

        let aoc = RunSettings::from_bundle(&presets::aoc()).unwrap();
        assert_eq!(aoc.training_steps_or_total(), 1_000_000);
        assert_eq!(aoc.policy_steps, None);
    }

    #[test]
    fn test_base_lacks_network_settings() {
        let err = NetworkSettings::from_bundle(&presets::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(_)));
    }

    #[test]
    fn test_exploration_settings() {
        let exploration = ExplorationSettings::from_bundle(&presets::ac()).unwrap();
        assert_eq!(exploration.explore_steps, 100_000);
        assert_eq!(exploration.initial_random_action_prob, 1.0);
        assert_eq!(exploration.delib_cost, 0.0);
    }
}
