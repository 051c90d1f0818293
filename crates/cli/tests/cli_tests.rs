//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("quill")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

#[test]
fn test_cli_html_input() {
    let assert = cmd()
        .args(["--html", &get_fixture_path("profile.html")])
        .assert()
        .success();

    let json = stdout_json(&assert.get_output().stdout);
    assert_eq!(json["author"], "Chris Sev");
    assert_eq!(json["role"], "Admin");
    assert_eq!(json["posts"][0]["title"], "Intro to X");
    assert_eq!(json["posts"][0]["url"], "https://scotch.io/tutorials/x");
    assert_eq!(json["posts"][0]["views"], 1024);
    assert_eq!(json["posts"][0]["comments"], 12);
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("profile.html")).unwrap();
    cmd()
        .args(["--html", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"twitter\""));
}

#[test]
fn test_cli_compact_output() {
    cmd()
        .args(["--compact", "--html", &get_fixture_path("profile.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\"author\":\"Chris Sev\",\"role\":\"Admin\""));
}

#[test]
fn test_cli_envelope() {
    let assert = cmd()
        .args(["--envelope", "--html", &get_fixture_path("profile.html")])
        .assert()
        .success();

    let json = stdout_json(&assert.get_output().stdout);
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["stats"]["posts"], 1302);
}

#[test]
fn test_cli_meta() {
    let assert = cmd()
        .args(["--meta", "--html", &get_fixture_path("profile.html")])
        .assert()
        .success();

    let json = stdout_json(&assert.get_output().stdout);
    assert_eq!(json["profile"]["author"], "Chris Sev");
    assert_eq!(json["meta"]["type"], "profile");
    assert_eq!(json["meta"]["tags"], serde_json::json!(["javascript", "node"]));
}

#[test]
fn test_cli_base_url() {
    let assert = cmd()
        .args(["--base-url", "https://scotch.example/", "--html", &get_fixture_path("profile.html")])
        .assert()
        .success();

    let json = stdout_json(&assert.get_output().stdout);
    assert_eq!(json["posts"][0]["url"], "https://scotch.example/tutorials/x");
}

#[test]
fn test_cli_empty_grid() {
    let assert = cmd()
        .args(["--html", &get_fixture_path("empty_grid.html")])
        .assert()
        .success();

    let json = stdout_json(&assert.get_output().stdout);
    assert_eq!(json["author"], "New Author");
    assert_eq!(json["posts"], serde_json::json!([]));
    assert_eq!(json["social"], serde_json::json!({}));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("profile.json");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .args(["--html", &get_fixture_path("profile.html")])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("Intro to X"));
}

#[test]
fn test_cli_verbose_goes_to_stderr() {
    let assert = cmd()
        .args(["-v", "--html", &get_fixture_path("profile.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Extracting profile"));

    let json = stdout_json(&assert.get_output().stdout);
    assert_eq!(json["author"], "Chris Sev");
}

#[test]
fn test_cli_missing_file() {
    cmd()
        .args(["--html", "nonexistent.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_requires_author_or_html() {
    cmd().assert().failure();
}

#[test]
fn test_cli_invalid_base_url() {
    cmd()
        .args(["--base-url", "not a url", "--html", &get_fixture_path("profile.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}

#[test]
fn test_cli_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract author profiles"));
}
