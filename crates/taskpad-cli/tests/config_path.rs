use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_url_persists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", dir.path())
        .args(["config", "set-url", "http://tasks.example.com:9000"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Set base_url to http://tasks.example.com:9000",
        ));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains(r#"base_url = "http://tasks.example.com:9000""#));
}

#[test]
fn test_config_set_url_rejects_invalid_url() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", dir.path())
        .args(["config", "set-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));

    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_base_url_flag_rejects_invalid_url() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", dir.path())
        .args(["--base-url", "not a url", "logout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}
