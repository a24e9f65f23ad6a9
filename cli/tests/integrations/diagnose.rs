use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const NO_MATCH: &str = "No matching rule found for the provided symptoms.";

#[test]
fn test_cli_diagnose_overheating() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose").arg("high_temp").arg("loud_fan");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Overheating Detected"))
        .stdout(predicate::str::contains("R1 Overheating Issue (90%)"))
        .stdout(predicate::str::contains("1. Turn off the PC and let it cool down."));
}

#[test]
fn test_cli_diagnose_nothing_observed() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(NO_MATCH));
}

#[test]
fn test_cli_diagnose_json_output() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose")
        .arg("blue_screen")
        .arg("high_temp")
        .arg("frequent_crashes")
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["result"][0]["rule_id"], "R1");
    assert_eq!(json["result"][0]["confidence"], 0.9);
    assert_eq!(json["result"][1]["rule_id"], "R5");
    assert!(json.get("message").is_none());
}

#[test]
fn test_cli_diagnose_json_no_match_message() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose").arg("ip_valid=false").arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"result\": []"))
        .stdout(predicate::str::contains(NO_MATCH));
}

#[test]
fn test_cli_diagnose_text_fact() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose")
        .arg("no_internet")
        .arg("net_state=wired")
        .arg("ip_valid=false");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Network Configuration Issue"));
}

#[test]
fn test_cli_diagnose_json_input_from_stdin() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose")
        .arg("--json-input")
        .arg("-")
        .arg("--json")
        .write_stdin(r#"{"boot_loop": true, "recent_driver_install": true}"#);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"rule_id\": \"R4\""));
}

#[test]
fn test_cli_diagnose_rejects_json_array() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("facts.json");
    fs::write(&input, r#"["high_temp"]"#).unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose").arg("--json-input").arg(&input);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

#[test]
fn test_cli_diagnose_rejects_empty_fact_name() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose").arg("=true");

    cmd.assert().failure();
}

#[test]
fn test_cli_diagnose_custom_catalog() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("printer.toml"),
        r#"
[[rules]]
id = "P1"
name = "Paper Jam"
condition = { all = [{ flag = "printer_error" }, { equals = { key = "tray", value = "empty" } }] }
cause = "Out of Paper"
explanation = "The printer reports an error and the tray is empty."
recommendations = ["Refill the paper tray."]
confidence = 0.75
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose")
        .arg("printer_error")
        .arg("tray=empty")
        .arg("--rules")
        .arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("P1 Paper Jam (75%)"))
        .stdout(predicate::str::contains("Out of Paper"));
}

#[test]
fn test_cli_diagnose_broken_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = temp_dir.path().join("broken.toml");
    fs::write(&catalog, "[[rules]]\nid = 5\n").unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose").arg("high_temp").arg("--rules").arg(&catalog);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml"));
}
