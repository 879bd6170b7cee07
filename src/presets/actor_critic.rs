use super::default;
use crate::bundle::ConfigBundle;
use crate::summaries::WeightSummaries;
use crate::types::{AgentKind, EnvSpec, NetworkKind, OptimizerKind, Value};

/// Actor-critic family with successor-feature transition learning
pub fn ac() -> ConfigBundle {
    config_bundle!(default() => {
        policy_agent: AgentKind::Ac,
        sf_agent: AgentKind::AcSf,
        option_agent: AgentKind::AcOption,
        matrix_agent: AgentKind::AcMatrix,
        tabular_sf_agent: AgentKind::TabularSf,
        linear_sf_agent: AgentKind::LinearSf,
        num_agents: 8,
        use_gpu: false,
        nb_options: 4,

        // Network
        network: NetworkKind::Ac,
        weight_summaries: WeightSummaries::standard(),
        input_size: Value::tuple([7, 6]),
        history_size: 3,
        conv_layers: Value::layers(vec![vec![5, 2, 32]]),
        fc_layers: Value::tuple([128]),
        sf_layers: Value::tuple([128, 128]),

        // Optimization
        network_optimizer: OptimizerKind::Adam,
        lr: 1e-3,
        sf_lr: 1e-3,
        discount: 0.985,
        entropy_coef: 1e-4,
        critic_coef: 0.5,
        sf_coef: 1.0,
        instant_r_coef: 1.0,
        option_entropy_coef: 0.01,
        auto_coef: 1.0,

        env: EnvSpec::grid_world("./mdps/2rooms.mdp"),
        max_update_freq: 30,
        min_update_freq: 5,
        steps: 1_000_000,
        explore_steps: 100_000,
        final_random_action_prob: 0.1,
        initial_random_action_prob: 1.0,
        delib_cost: 0.0,
        margin_cost: 0.0,
        gradient_clip_value: 40.0,
        summary_interval: 10,
        checkpoint_interval: 1,
        eval_interval: 1,
        policy_steps: 1_000,
        sf_transition_matrix_steps: 300,
        sf_transition_options_steps: 400,
        sf_transition_matrix_size: 1_000,
    })
}

/// Linear successor features on the two-rooms grid
pub fn linear() -> ConfigBundle {
    linear_on((7, 6), "./mdps/2rooms.mdp")
}

/// Linear successor features on the four-rooms grid
pub fn linear_4rooms() -> ConfigBundle {
    linear_on((13, 13), "./mdps/4rooms.mdp")
}

fn linear_on(input_size: (i64, i64), mdp_path: &str) -> ConfigBundle {
    config_bundle!(default() => {
        linear_sf_agent: AgentKind::LinearSf,
        num_agents: 8,
        use_gpu: false,
        nb_options: 4,

        // Network
        network: NetworkKind::LinearSf,
        weight_summaries: WeightSummaries::standard(),
        input_size: Value::tuple([input_size.0, input_size.1]),
        history_size: 3,
        conv_layers: Value::layers(vec![vec![5, 2, 32]]),
        fc_layers: Value::tuple([128]),
        sf_layers: Value::tuple([128, 128]),

        // Optimization
        network_optimizer: OptimizerKind::Adam,
        lr: 1e-3,
        sf_lr: 1e-3,
        discount: 0.985,
        entropy_coef: 1e-4,
        critic_coef: 0.5,
        sf_coef: 1.0,
        instant_r_coef: 1.0,
        option_entropy_coef: 0.01,
        auto_coef: 1.0,

        env: EnvSpec::grid_world(mdp_path),
        max_update_freq: 30,
        min_update_freq: 5,
        steps: 1_000_000,
        explore_steps: 100_000,
        final_random_action_prob: 0.1,
        initial_random_action_prob: 1.0,
        delib_cost: 0.0,
        margin_cost: 0.0,
        gradient_clip_value: 40.0,
        summary_interval: 10,
        checkpoint_interval: 1,
        eval_interval: 1,
        policy_steps: 1_000,
        sf_transition_matrix_steps: 300,
        sf_transition_options_steps: 400,
        sf_transition_matrix_size: 1_000,
    })
}

/// DIF agent with an auxiliary reconstruction head, four-rooms grid
pub fn dif_4rooms() -> ConfigBundle {
    config_bundle!(default() => {
        dif_agent: AgentKind::Dif,
        num_agents: 8,
        use_gpu: false,
        nb_options: 4,

        // Network
        network: NetworkKind::Dif,
        weight_summaries: WeightSummaries::standard(),
        conv_layers: Value::layers(vec![vec![5, 2, 64]]),
        input_size: Value::tuple([13, 13]),
        history_size: 3,
        fc_layers: Value::tuple([128]),
        sf_layers: Value::tuple([128, 256, 128]),
        aux_fc_layers: Value::tuple([128]),
        // one deconv reconstructing the 13x13x3 observation
        aux_deconv_layers: Value::layers(vec![vec![5, 1, 0, 13 * 13 * 3]]),

        // Optimization
        network_optimizer: OptimizerKind::RMSProp,
        lr: 1e-4,
        discount: 0.985,
        entropy_coef: 1e-4,
        critic_coef: 0.5,
        sf_coef: 1.0,
        instant_r_coef: 1.0,
        option_entropy_coef: 0.01,
        aux_coef: 1.0,

        env: EnvSpec::grid_world("./mdps/4rooms.mdp"),
        max_update_freq: 30,
        min_update_freq: 5,
        steps: 1_000_000,
        training_steps: 500_000,
        explore_steps: 100_000,
        final_random_action_prob: 0.1,
        initial_random_action_prob: 1.0,
        delib_cost: 0.0,
        margin_cost: 0.0,
        gradient_clip_value: 40.0,
        summary_interval: 10,
        checkpoint_interval: 10,
        eval_interval: 1,
        policy_steps: 1_000,
        sf_transition_matrix_size: 50_000,
    })
}
