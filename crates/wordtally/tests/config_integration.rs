//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Most use
//! `info --json` to assert actual config values; the rest check that
//! `list` and `cloud` honor what was loaded.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert_eq!(json["config"]["stop_words"], "StopWords.txt");
    assert_eq!(json["config"]["font_scale"], "linear");
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordtally.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "debug");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with(".wordtally.toml"),
        "should report dotfile: {reported}"
    );
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("books").join("classics");
    fs::create_dir_all(&sub_dir).unwrap();

    fs::write(
        tmp.path().join("wordtally.toml"),
        r#"stop_words = "english.txt""#,
    )
    .unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(json["config"]["stop_words"], "english.txt");
    assert!(
        json["config"]["config_file"].as_str().is_some(),
        "should find parent config"
    );
}

#[test]
fn regular_name_overrides_dotfile() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordtally.toml"), r#"log_level = "debug""#).unwrap();
    fs::write(tmp.path().join("wordtally.toml"), r#"log_level = "error""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(
        json["config"]["log_level"], "error",
        "regular file should override dotfile"
    );
}

// =============================================================================
// Config Format Parsing
// =============================================================================

#[test]
fn parses_yaml_cloud_settings() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".wordtally.yaml"),
        "cloud_title: Moby Dick\nmin_font_px: 8\nmax_font_px: 48\nfont_scale: log\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["cloud_title"], "Moby Dick");
    assert_eq!(json["config"]["min_font_px"], 8);
    assert_eq!(json["config"]["max_font_px"], 48);
    assert_eq!(json["config"]["font_scale"], "log");
}

#[test]
fn parses_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".wordtally.json"),
        r#"{"max_input_bytes": 2048}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["max_input_bytes"], 2048);
}

#[test]
fn disable_input_limit_hides_max_bytes() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".wordtally.toml"),
        "max_input_bytes = 2048\ndisable_input_limit = true\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert!(json["config"]["max_input_bytes"].is_null());
}

// =============================================================================
// Config Precedence
// =============================================================================

#[test]
fn closer_config_takes_precedence() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("project");
    fs::create_dir_all(&sub_dir).unwrap();

    fs::write(tmp.path().join(".wordtally.toml"), r#"log_level = "error""#).unwrap();
    fs::write(sub_dir.join(".wordtally.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(
        json["config"]["log_level"], "debug",
        "closer config should win"
    );
}

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordtally.toml"), r#"cloud_title = "Found""#).unwrap();

    let explicit = tmp.path().join("override.toml");
    fs::write(&explicit, r#"cloud_title = "Explicit""#).unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["cloud_title"], "Explicit");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with("override.toml"),
        "--config path should be reported: {reported}"
    );
}

#[test]
fn env_var_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".wordtally.toml"),
        r#"stop_words = "file.txt""#,
    )
    .unwrap();

    let output = cmd()
        .env("WORDTALLY_STOP_WORDS", "env.txt")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["stop_words"], "env.txt");
}

#[test]
fn numeric_env_title_is_kept_as_text() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("StopWords.txt"), "").unwrap();
    fs::write(tmp.path().join("text.txt"), "whale").unwrap();

    cmd()
        .env("WORDTALLY_CLOUD_TITLE", "2024")
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "cloud",
            "text.txt",
            "1",
            "c.html",
        ])
        .assert()
        .success();

    let html = fs::read_to_string(tmp.path().join("c.html")).unwrap();
    assert!(html.contains("<title>2024</title>"));
}

// =============================================================================
// Config Applied to Commands
// =============================================================================

#[test]
fn configured_stop_words_are_used_by_list() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("skip.txt"), "the\n").unwrap();
    fs::write(tmp.path().join("text.txt"), "the cat the cat the").unwrap();
    fs::write(
        tmp.path().join(".wordtally.toml"),
        r#"stop_words = "skip.txt""#,
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "list", "text.txt"])
        .assert()
        .success()
        .stdout(predicate::str::diff("cat:2\n"));
}

#[test]
fn configured_input_limit_rejects_large_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("StopWords.txt"), "").unwrap();
    fs::write(tmp.path().join("text.txt"), "word ".repeat(100)).unwrap();
    fs::write(tmp.path().join(".wordtally.toml"), "max_input_bytes = 16\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "list", "text.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn configured_word_limit_skips_long_tokens() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("StopWords.txt"), "").unwrap();
    fs::write(tmp.path().join("text.txt"), "cat caterpillar cat").unwrap();
    fs::write(tmp.path().join(".wordtally.toml"), "max_word_chars = 5\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "list", "text.txt"])
        .assert()
        .success()
        .stdout(predicate::str::diff("cat:2\n"));

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["max_word_chars"], 5);
}

#[test]
fn configured_cloud_title_is_rendered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("StopWords.txt"), "").unwrap();
    fs::write(tmp.path().join("text.txt"), "whale whale sea").unwrap();
    fs::write(
        tmp.path().join(".wordtally.toml"),
        r#"cloud_title = "Moby Dick""#,
    )
    .unwrap();

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "cloud",
            "text.txt",
            "10",
            "cloud.html",
        ])
        .assert()
        .success();

    let html = fs::read_to_string(tmp.path().join("cloud.html")).unwrap();
    assert!(html.contains("<title>Moby Dick</title>"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".wordtally.toml"),
        "this is not valid toml [[[",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn missing_explicit_config_shows_error() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            "absent.toml",
            "info",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_font_scale_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordtally.toml"), r#"font_scale = "cubic""#).unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn unknown_config_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".wordtally.toml"),
        "log_level = \"warn\"\nunknown_field = \"should be ignored\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "warn");
}

// =============================================================================
// Boundary Marker Tests
// =============================================================================

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let parent = tmp.path().join("parent");
    let repo = parent.join("repo");
    let src = repo.join("texts");
    fs::create_dir_all(&src).unwrap();

    fs::write(parent.join(".wordtally.toml"), r#"log_level = "error""#).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();

    let json = info_json(&src);

    assert_eq!(
        json["config"]["log_level"], "info",
        "boundary should stop the search"
    );
}

#[test]
fn config_in_same_dir_as_git_is_found() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("texts");
    fs::create_dir_all(&src).unwrap();

    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(repo.join(".wordtally.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(&src);

    assert_eq!(
        json["config"]["log_level"], "debug",
        "config next to .git should be found"
    );
}
