//! Article commands against a mock API.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn logged_in_home() -> TempDir {
    let home = tempdir().unwrap();
    fs::write(home.path().join("session.json"), r#"{"token":"abc"}"#).unwrap();
    home
}

fn artdesk(home: &Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("artdesk");
    cmd.env("ARTDESK_HOME", home)
        .env("ARTDESK_BASE_URL", server.uri());
    cmd
}

#[tokio::test]
async fn test_list_prints_articles_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(header("authorization", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Here are your articles, foo!",
            "articles": [
                {"article_id": 2, "title": "Closures", "text": "Functions remember", "topic": "JavaScript"},
                {"article_id": 1, "title": "Streams", "text": "Chunks of data", "topic": "Node"},
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = logged_in_home();
    artdesk(home.path(), &server)
        .args(["articles", "list"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Here are your articles, foo!\n\
             [2] Closures (JavaScript): Functions remember\n\
             [1] Streams (Node): Chunks of data\n",
        ));
}

#[tokio::test]
async fn test_list_without_session_reports_invalid_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token required"})))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    artdesk(home.path(), &server)
        .args(["articles", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ouch: jwt malformed"));

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_create_sends_only_editable_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .and(header("authorization", "abc"))
        .and(body_json(json!({"title": "T", "text": "X", "topic": "JavaScript"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Well done, foo. Great article!",
            "article": {"article_id": 3, "title": "T", "text": "X", "topic": "JavaScript"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = logged_in_home();
    artdesk(home.path(), &server)
        .args([
            "articles",
            "create",
            "--title",
            "T",
            "--text",
            "X",
            "--topic",
            "javascript",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Well done, foo. Great article!"))
        .stdout(predicate::str::contains("[3] T (JavaScript): X"));
}

#[tokio::test]
async fn test_update_puts_to_article_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/articles/7"))
        .and(header("authorization", "abc"))
        .and(body_json(json!({"title": "New", "text": "Body", "topic": "React"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Nice update, foo!",
            "article": {"article_id": 7, "title": "New", "text": "Body", "topic": "React"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = logged_in_home();
    artdesk(home.path(), &server)
        .args([
            "articles", "update", "7", "--title", "New", "--text", "Body", "--topic", "React",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nice update, foo!"));
}

#[tokio::test]
async fn test_delete_failure_is_session_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/articles/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let home = logged_in_home();
    artdesk(home.path(), &server)
        .args(["articles", "delete", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ouch: jwt malformed"));
}

#[tokio::test]
async fn test_delete_prints_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/articles/9"))
        .and(header("authorization", "abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Article 9 was deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = logged_in_home();
    artdesk(home.path(), &server)
        .args(["articles", "delete", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Article 9 was deleted"));
}
