//! Integration tests for login/logout commands.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn login_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"username": "foo", "password": "12345678"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Welcome back, foo!", "token": "abc"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;
    server
}

fn stored_token(home: &std::path::Path) -> Option<String> {
    let contents = fs::read_to_string(home.join("session.json")).ok()?;
    let value: serde_json::Value = serde_json::from_str(&contents).ok()?;
    value["token"].as_str().map(str::to_string)
}

#[tokio::test]
async fn test_login_stores_token() {
    let server = login_server().await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("artdesk")
        .env("ARTDESK_HOME", home.path())
        .env("ARTDESK_BASE_URL", server.uri())
        .args(["login", "--username", "foo", "--password", "12345678"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome back, foo!"));

    assert_eq!(stored_token(home.path()).as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_login_reads_password_from_stdin() {
    let server = login_server().await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("artdesk")
        .env("ARTDESK_HOME", home.path())
        .env("ARTDESK_BASE_URL", server.uri())
        .args(["login", "--username", "foo"])
        .write_stdin("12345678\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome back, foo!"));

    assert_eq!(stored_token(home.path()).as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_login_failure_exits_nonzero_without_token() {
    let server = login_server().await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("artdesk")
        .env("ARTDESK_HOME", home.path())
        .env("ARTDESK_BASE_URL", server.uri())
        .args(["login", "--username", "foo", "--password", "wrong-password"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login failed: Invalid credentials"));

    assert!(stored_token(home.path()).is_none());
}

#[tokio::test]
async fn test_ephemeral_login_writes_nothing() {
    let server = login_server().await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("artdesk")
        .env("ARTDESK_HOME", home.path())
        .env("ARTDESK_BASE_URL", server.uri())
        .args([
            "--ephemeral",
            "login",
            "--username",
            "foo",
            "--password",
            "12345678",
        ])
        .assert()
        .success();

    assert!(!home.path().join("session.json").exists());
}

#[test]
fn test_logout_clears_token_and_says_goodbye() {
    let home = tempdir().unwrap();
    fs::write(home.path().join("session.json"), r#"{"token":"abc"}"#).unwrap();

    cargo_bin_cmd!("artdesk")
        .env("ARTDESK_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::diff("Goodbye!\n"));

    assert!(stored_token(home.path()).is_none());
}

#[test]
fn test_logout_when_not_logged_in_is_fine() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("artdesk")
        .env("ARTDESK_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));
}
