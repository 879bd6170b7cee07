use crate::builders::BundleBuilder;
use crate::bundle::ConfigBundle;
use crate::registry::{get_base, get_bundle};
use crate::summaries::WeightSummaries;
use crate::types::{AgentKind, NetworkKind, OptimizerKind, Value};

#[test]
fn test_base_keys_come_first() {
    let aoc = get_bundle("aoc").unwrap();
    let base = get_base();
    let base_keys: Vec<&str> = base.keys().collect();
    let leading: Vec<&str> = aoc.keys().take(base_keys.len()).collect();
    assert_eq!(leading, base_keys);
    assert_eq!(leading, vec!["num_agents", "eval_episodes", "use_gpu", "max_length"]);
}

#[test]
fn test_override_merge_is_shallow() {
    let mut summaries = WeightSummaries::new();
    summaries.insert("conv", r".*/conv/.*");

    let bundle = BundleBuilder::from_base(get_bundle("aoc").unwrap())
        .set("weight_summaries", summaries.clone())
        .build();

    let replaced: WeightSummaries = bundle.get("weight_summaries").unwrap();
    assert_eq!(replaced, summaries);
    assert_eq!(replaced.len(), 1);
}

#[test]
fn test_json_output() {
    let json = get_bundle("dif_4rooms").unwrap().to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["dif_agent"], "DIFAgent");
    assert_eq!(parsed["network_optimizer"], "RMSPropOptimizer");
    assert_eq!(parsed["aux_deconv_layers"], serde_json::json!([[5, 1, 0, 507]]));
    assert_eq!(parsed["env"]["kind"], "GridWorld");
    assert_eq!(parsed["env"]["mdp_path"], "./mdps/4rooms.mdp");
    assert_eq!(parsed["weight_summaries"]["term"], ".*/option_term/.*");
    assert_eq!(parsed["steps"], 1_000_000);
}

#[test]
fn test_display_lists_every_setting() {
    let bundle = get_bundle("ac").unwrap();
    let text = bundle.to_string();
    assert_eq!(text.lines().count(), bundle.len());
    assert!(text.contains("conv_layers"));
    assert!(text.contains("((5, 2, 32),)"));
    assert!(text.contains("GridWorld(./mdps/2rooms.mdp)"));
}

#[test]
fn test_overrides_on_preset() {
    let mut bundle = get_bundle("aoc").unwrap();
    bundle
        .apply_overrides([
            "lr=0.0007",
            "nb_options=8",
            "conv_layers=[[8, 4, 16], [4, 2, 32]]",
            "fc_layers=256",
            "network_optimizer=RMSPropOptimizer",
            "agent=SFAgent",
        ])
        .unwrap();

    assert_eq!(bundle.get::<f64>("lr").unwrap(), 0.0007);
    assert_eq!(bundle.get::<i64>("nb_options").unwrap(), 8);
    assert_eq!(bundle["conv_layers"], Value::layers(vec![vec![8, 4, 16], vec![4, 2, 32]]));
    assert_eq!(bundle["fc_layers"], Value::tuple([256]));
    assert_eq!(bundle.get::<OptimizerKind>("network_optimizer").unwrap(), OptimizerKind::RMSProp);
    assert_eq!(bundle.get::<AgentKind>("agent").unwrap(), AgentKind::Sf);
    assert_eq!(bundle.get::<NetworkKind>("network").unwrap(), NetworkKind::Aoc);
}

#[test]
fn test_collect_into_bundle() {
    let bundle: ConfigBundle = vec![("a", Value::Int(1)), ("b", Value::Int(2)), ("a", Value::Int(3))]
        .into_iter()
        .collect();
    assert_eq!(bundle.len(), 2);
    assert_eq!(bundle["a"], Value::Int(3));
}
