use super::default;
use crate::bundle::ConfigBundle;
use crate::summaries::WeightSummaries;
use crate::types::{AgentKind, EnvSpec, NetworkKind, OptimizerKind, Value};

/// Option-critic agent on the four-rooms grid
pub fn aoc() -> ConfigBundle {
    config_bundle!(default() => {
        agent: AgentKind::Aoc,
        num_agents: 8,
        use_gpu: false,

        // Network
        network: NetworkKind::Aoc,
        weight_summaries: WeightSummaries::standard(),
        input_size: Value::tuple([13, 13]),
        history_size: 3,
        conv_layers: Value::layers(vec![vec![5, 2, 32]]),
        deconv_layers: Value::layers(vec![
            vec![4, 2, 0, 128],
            vec![4, 2, 1, 64],
            vec![4, 2, 0, 32],
            vec![],
        ]),
        fc_layers: Value::tuple([128]),
        sf_layers: Value::tuple([256, 128, 256]),

        // Optimization
        network_optimizer: OptimizerKind::Adam,
        lr: 1e-3,

        // Losses
        discount: 0.985,
        entropy_coef: 1e-4,
        critic_coef: 0.5,

        nb_options: 4,
        env: EnvSpec::grid_world("./mdps/4rooms.mdp"),
        max_update_freq: 30,
        min_update_freq: 5,
        steps: 1_000_000,
        explore_steps: 1,
        final_random_action_prob: 0.1,
        initial_random_action_prob: 1.0,
        delib_cost: 0.0,
        margin_cost: 0.0,
        gradient_clip_value: 40.0,
        summary_interval: 1,
        checkpoint_interval: 1,
        eval_interval: 100,
    })
}

/// Successor-feature agent on the toy grid
pub fn sf() -> ConfigBundle {
    config_bundle!(default() => {
        agent: AgentKind::Sf,
        num_agents: 8,
        use_gpu: false,

        // Network
        network: NetworkKind::Sf,
        weight_summaries: WeightSummaries::standard(),
        input_size: Value::tuple([16, 16]),
        history_size: 3,
        conv_layers: Value::layers(vec![vec![5, 2, 32]]),
        deconv_layers: Value::layers(vec![
            vec![4, 2, 0, 128],
            vec![4, 2, 1, 64],
            vec![2, 2, 0, 3],
        ]),
        fc_layers: Value::tuple([128]),
        sf_layers: Value::tuple([256, 128]),

        // Optimization
        network_optimizer: OptimizerKind::Adam,
        lr: 1e-3,

        // Losses
        discount: 0.985,
        entropy_coef: 1e-4,
        sf_coef: 0.5,
        instant_r_coef: 0.5,
        auto_coef: 1.0,

        nb_options: 4,
        env: EnvSpec::grid_world("./mdps/toy.mdp"),
        max_update_freq: 30,
        min_update_freq: 5,
        steps: 1_000_000,
        explore_steps: 1,
        final_random_action_prob: 0.1,
        initial_random_action_prob: 1.0,
        delib_cost: 0.0,
        margin_cost: 0.0,
        gradient_clip_value: 40.0,
        summary_interval: 1,
        checkpoint_interval: 1,
        eval_interval: 100,
    })
}
