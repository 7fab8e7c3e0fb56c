use std::path::PathBuf;
use std::process::Command;

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "nachmund-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn tracker() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_nachmund-tracker"));
    command.env("NO_COLOR", "1");
    command
}

#[test]
fn cli_show_writes_console_tables() {
    let output_path = temp_path("show");
    let status = tracker()
        .arg("show")
        .arg(fixture("campaign.yaml"))
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Phase 1"));
    assert!(content.contains("Phase 3"));
    assert!(content.contains("BP Allocation"));
    assert!(content.contains("SAP Allocation"));
    assert!(content.contains("Guardians"));
}

#[test]
fn cli_show_filters_phase_and_alliance() {
    let output = tracker()
        .arg("show")
        .arg(fixture("campaign.yaml"))
        .args(["-p", "2", "-a", "g", "--report", "json"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json report on stdout");
    let phases = value.as_array().expect("array of phases");
    assert_eq!(phases.len(), 1);
    assert_eq!(phases[0]["phase"], 2);
    assert_eq!(phases[0]["alliances"][0]["alliance"], "guardians");
    assert_eq!(phases[0]["alliances"][0]["bp"]["spaceport"], 4);
    assert_eq!(phases[0]["alliances"][0]["bp"]["total"], 4);
}

#[test]
fn cli_shows_results_without_a_subcommand() {
    let output = tracker()
        .arg(fixture("campaign.yaml"))
        .args(["--phase", "3", "--report", "json"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json report on stdout");
    assert_eq!(value[0]["phase"], 3);
}

#[test]
fn cli_show_warns_but_still_reports_valid_subset() {
    let output = tracker()
        .arg("show")
        .arg(fixture("mixed.yaml"))
        .args(["--phase", "3", "--report", "markdown"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("run the validate command to see details"));
    assert!(stdout.contains("## Phase 3"));
    assert!(stdout.contains("| Marauders | 2 | 0 | 0 | 0 | 2 |"));
}

#[test]
fn cli_validate_accepts_clean_campaign() {
    let output = tracker()
        .arg("validate")
        .arg(fixture("campaign.yaml"))
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("campaign file valid"));
}

#[test]
fn cli_validate_lists_every_invalid_record() {
    let output_path = temp_path("validate");
    let status = tracker()
        .arg("validate")
        .arg(fixture("mixed.yaml"))
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(!status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("3 invalid game records (1 valid)"));
    assert!(content.contains("mission Twin Guardians"));
    assert!(content.contains("game must have a 2 different alliances"));
    assert!(content.contains("victor must be one of [guardians marauders] or DRAW"));
    assert!(content.contains("sap gained are unallocated for alliance guardians"));
}

#[test]
fn cli_reports_decode_failures() {
    for command in ["show", "validate"] {
        let output = tracker()
            .arg(command)
            .arg(fixture("malformed.yaml"))
            .output()
            .expect("run cli");
        assert!(!output.status.success(), "{command} should fail");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("decoding yaml"), "{command}: {stderr}");
    }
}

#[test]
fn cli_rejects_missing_file() {
    let output = tracker()
        .arg("show")
        .arg(temp_path("missing.yaml"))
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("reading"));
}
