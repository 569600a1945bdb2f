//! CLI integration tests.
//!
//! These run the `arubacloud` binary with isolated HOME and working
//! directories so no real credentials are picked up.

#![allow(deprecated)] // Allow deprecated cargo_bin for now

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn isolated(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("arubacloud").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("ARUBACLOUD_USERNAME")
        .env_remove("ARUBACLOUD_PASSWORD")
        .env_remove("ARUBACLOUD_APISERVER")
        .env_remove("ARUBACLOUD_DATACENTER")
        .env_remove("ARUBACLOUD_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("power-cycle"))
        .stdout(predicate::str::contains("hypervisors"));
}

#[test]
fn test_missing_credentials_fail() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("servers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("username is required"));
}

#[test]
fn test_invalid_datacenter_fails() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["--datacenter", "atlantis", "servers"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown datacenter"));
}

#[test]
fn test_credentials_file_is_used() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join(".arubacloud");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("credentials.json"),
        r#"{"username": "ARU-file", "password": "from-file"}"#,
    )
    .unwrap();

    // Nothing listens on port 9: the request itself fails, after credentials resolved
    isolated(&dir)
        .args(["--api-server", "http://127.0.0.1:9", "--timeout", "2", "jobs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("username is required").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_servers_prints_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/WsEndUser/v2.9/WsEndUser.svc/json/GetServers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "ResultCode": 0,
            "Value": [{"ServerId": 21, "Name": "web-1", "ServerStatus": 3}]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = server.uri();
    let output = isolated(&dir)
        .args(["--api-server", uri.as_str(), "-u", "ARU-1", "-p", "pw", "servers"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed[0]["Name"], json!("web-1"));
    assert_eq!(printed[0]["ServerStatus"], json!(3));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_error_fails_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": false,
            "ResultCode": 10,
            "ResultMessage": "Invalid credentials\r\n   at Auth.Check()"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = server.uri();
    isolated(&dir)
        .args(["--api-server", uri.as_str(), "-u", "ARU-1", "-p", "bad", "ips"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials. Result code: 10"))
        .stderr(predicate::str::contains("Auth.Check").not());
}
