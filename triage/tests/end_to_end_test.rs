use triage::{Engine, FactSet};

fn causes(engine: &Engine, facts: &FactSet) -> Vec<(String, f64)> {
    engine
        .infer(facts)
        .into_iter()
        .map(|d| (d.rule_id, d.confidence))
        .collect()
}

#[test]
fn test_overheating_with_loud_fan() {
    let engine = Engine::default();
    let facts = FactSet::new().with("high_temp", true).with("loud_fan", true);

    let results = engine.infer(&facts);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rule_id, "R1");
    assert_eq!(results[0].cause, "Overheating Detected");
    assert_eq!(results[0].confidence, 0.90);
}

#[test]
fn test_overheating_and_blue_screen_ranked() {
    let engine = Engine::default();
    let facts = FactSet::new()
        .with("blue_screen", true)
        .with("high_temp", true)
        .with("frequent_crashes", true);

    assert_eq!(
        causes(&engine, &facts),
        vec![("R1".to_string(), 0.90), ("R5".to_string(), 0.82)]
    );
}

#[test]
fn test_wired_network_without_valid_ip() {
    let engine = Engine::default();
    let facts = FactSet::new()
        .with("no_internet", true)
        .with("net_state", "wired")
        .with("ip_valid", false);

    let results = engine.infer(&facts);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rule_id, "R3");
    assert_eq!(results[0].confidence, 0.80);
    assert_eq!(results[0].cause, "Network Configuration Issue");
}

#[test]
fn test_empty_facts_match_nothing() {
    let engine = Engine::default();
    assert!(engine.infer(&FactSet::new()).is_empty());
}

#[test]
fn test_performance_requires_full_disk() {
    let engine = Engine::default();
    let facts = FactSet::new()
        .with("slow_pc", true)
        .with("high_ram", true)
        .with("disk_full", false);

    assert!(engine.infer(&facts).is_empty());
}

#[test]
fn test_describe_rules_first_entry() {
    let engine = Engine::default();
    let rules = engine.describe_rules();

    assert_eq!(rules[0].id, "R1");
    assert_eq!(rules[0].confidence_percent, 90);
}

#[test]
fn test_every_rule_fires_together() {
    let engine = Engine::default();
    let facts: FactSet = [
        "high_temp",
        "loud_fan",
        "slow_pc",
        "high_ram",
        "disk_full",
        "no_internet",
        "wifi_connected",
        "boot_loop",
        "recent_driver_install",
        "blue_screen",
    ]
    .into_iter()
    .map(|k| (k, true))
    .collect();

    let ids: Vec<String> = engine.infer(&facts).into_iter().map(|d| d.rule_id).collect();
    assert_eq!(ids, vec!["R1", "R4", "R2", "R5", "R3"]);
}

#[test]
fn test_recommendations_keep_their_order() {
    let engine = Engine::default();
    let results = engine.infer(&FactSet::new().with("boot_loop", true).with("recent_driver_install", true));

    assert_eq!(
        results[0].recommendations,
        vec![
            "Boot into Safe Mode.",
            "Rollback or uninstall the problematic driver.",
            "Use System Restore.",
        ]
    );
}

#[test]
fn test_mistyped_facts_do_not_match() {
    let engine = Engine::default();
    let facts: FactSet = serde_json::from_str(
        r#"{"blue_screen": "yes", "high_temp": 1, "loud_fan": true, "net_state": ["wired"]}"#,
    )
    .unwrap();

    assert!(engine.infer(&facts).is_empty());
}

#[test]
fn test_malformed_negated_fact_does_not_fire() {
    let engine = Engine::default();

    for ip_valid in [r#""true""#, r#""yes""#, "1", "null"] {
        let facts: FactSet = serde_json::from_str(&format!(
            r#"{{"no_internet": true, "wifi_connected": true, "ip_valid": {}}}"#,
            ip_valid
        ))
        .unwrap();

        assert!(engine.infer(&facts).is_empty(), "ip_valid = {}", ip_valid);
    }

    let valid_false = FactSet::new()
        .with("no_internet", true)
        .with("wifi_connected", true)
        .with("ip_valid", false);
    assert_eq!(engine.infer(&valid_false)[0].rule_id, "R3");
}

#[test]
fn test_diagnosis_json_shape() {
    let engine = Engine::default();
    let results = engine.infer(&FactSet::new().with("blue_screen", true));
    let json = serde_json::to_value(&results).unwrap();

    assert_eq!(json[0]["rule_id"], "R5");
    assert_eq!(json[0]["rule_name"], "Blue Screen Error");
    assert_eq!(json[0]["cause"], "Blue Screen of Death (BSOD)");
    assert_eq!(json[0]["confidence"], 0.82);
    assert_eq!(json[0]["recommendations"].as_array().map(|a| a.len()), Some(3));
}

#[test]
fn test_rule_descriptor_json_uses_percent() {
    let engine = Engine::default();
    let json = serde_json::to_value(engine.describe_rules()).unwrap();

    assert_eq!(json[0]["id"], "R1");
    assert_eq!(json[0]["confidence"], 90);
    assert_eq!(json[3]["confidence"], 88);
}
