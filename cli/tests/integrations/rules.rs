use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_rules_table() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("rules");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Catalog contains 5 rules"))
        .stdout(predicate::str::contains("Blue Screen Error"));
}

#[test]
fn test_cli_rules_json_percentages() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("rules").arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    let rules = json["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 5);
    assert_eq!(rules[0]["id"], "R1");
    assert_eq!(rules[0]["confidence"], 90);
    assert_eq!(rules[4]["confidence"], 82);
}

#[test]
fn test_cli_rules_toml_reloads() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("rules").arg("--toml");
    let exported = cmd.assert().success().get_output().stdout.clone();

    let temp_dir = TempDir::new().unwrap();
    let catalog = temp_dir.path().join("builtin.toml");
    fs::write(&catalog, exported).unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose")
        .arg("slow_pc")
        .arg("high_ram")
        .arg("disk_full")
        .arg("--rules")
        .arg(&catalog);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Performance Issue"));
}

#[test]
fn test_cli_show_rule() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("show").arg("R3");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Rule R3: Network IP/DNS Issue"))
        .stdout(predicate::str::contains(
            "no_internet AND (wifi_connected OR net_state == \"wired\") AND NOT ip_valid",
        ));
}

#[test]
fn test_cli_show_unknown_rule() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("show").arg("R42");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_help_lists_servers() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("mcp"));
}
