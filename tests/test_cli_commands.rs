mod common;

use common::PretimedProcess;

#[test]
fn validate_valid_config() {
    let config = PretimedProcess::fixture_path("default.yaml");
    let output = PretimedProcess::spawn_command(&["validate", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "validate should succeed for valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 valid"), "unexpected output: {stdout}");
}

#[test]
fn validate_invalid_config() {
    let config = PretimedProcess::fixture_path("zero_duration.yaml");
    let output = PretimedProcess::spawn_command(&["validate", config.to_str().unwrap()]);
    assert!(
        !output.status.success(),
        "validate should fail for invalid config"
    );
    assert_eq!(
        output.status.code(),
        Some(2),
        "config errors should map to exit code 2"
    );
}

#[test]
fn validate_json_output() {
    let config = PretimedProcess::fixture_path("default.yaml");
    let output = PretimedProcess::spawn_command(&[
        "validate",
        "--format",
        "json",
        config.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "validate --format json should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("output should be valid JSON");

    assert_eq!(parsed["summary"]["total"], 1);
    assert_eq!(parsed["summary"]["valid"], 1);
    assert_eq!(parsed["files"][0]["status"], "ok");
}

#[test]
fn validate_short_yellow_warns_but_passes() {
    let config = PretimedProcess::fixture_path("short_yellow.yaml");
    let output = PretimedProcess::spawn_command(&["validate", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "warnings alone should not fail validation"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("warning"), "expected a warning: {stdout}");
}

#[test]
fn validate_strict_promotes_warnings() {
    let config = PretimedProcess::fixture_path("short_yellow.yaml");
    let output =
        PretimedProcess::spawn_command(&["validate", "--strict", config.to_str().unwrap()]);
    assert!(
        !output.status.success(),
        "strict mode should fail on warnings"
    );
}

#[test]
fn validate_missing_file() {
    let output =
        PretimedProcess::spawn_command(&["validate", "/tmp/nonexistent_pretimed_timings.yaml"]);
    assert!(
        !output.status.success(),
        "validate should fail for nonexistent file"
    );
}

#[test]
fn version_human() {
    let output = PretimedProcess::spawn_command(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pretimed"), "unexpected output: {stdout}");
}

#[test]
fn version_json() {
    let output = PretimedProcess::spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("output should be valid JSON");
    assert_eq!(parsed["name"], "pretimed");
}

#[test]
fn timings_default_table() {
    let output = PretimedProcess::spawn_command(&["timings"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("NS red / EW green: 20 s"));
    assert!(stdout.contains("NS red / EW yellow: 5 s"));
    assert!(stdout.contains("full cycle: 50 s"));
}

#[test]
fn timings_json_with_config() {
    let config = PretimedProcess::fixture_path("custom.yaml");
    let output = PretimedProcess::spawn_command(&[
        "timings",
        "--format",
        "json",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "timings should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("output should be valid JSON");
    assert_eq!(parsed["ns_red_ew_green"], 12);
    assert_eq!(parsed["ns_red_ew_yellow"], 3);
    assert_eq!(parsed["ns_green_ew_red"], 18);
    assert_eq!(parsed["ns_yellow_ew_red"], 4);
    assert_eq!(parsed["cycle_seconds"], 37);
}

#[test]
fn timings_invalid_config_fails() {
    let config = PretimedProcess::fixture_path("zero_duration.yaml");
    let output = PretimedProcess::spawn_command(&["timings", "--config", config.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn completions_bash() {
    let output = PretimedProcess::spawn_command(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(
        !output.stdout.is_empty(),
        "completion script should not be empty"
    );
}

#[test]
fn run_for_two_seconds_renders_dashboard() {
    let output = PretimedProcess::spawn_command(&["--quiet", "run", "--for", "2"]);
    assert!(
        output.status.success(),
        "bounded run should exit cleanly: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Opening phase with its full countdown, then the post-stop repaint.
    assert!(
        stdout.contains("NS red / EW green  20 s"),
        "missing opening dashboard line: {stdout}"
    );
    assert!(
        stdout.contains("System Off  0 s"),
        "missing stopped dashboard line: {stdout}"
    );
}
