use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("artdesk")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("articles"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--ephemeral"));
}

#[test]
fn test_articles_help_shows_subcommands() {
    cargo_bin_cmd!("artdesk")
        .args(["articles", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_create_rejects_unknown_topic() {
    cargo_bin_cmd!("artdesk")
        .args([
            "articles", "create", "--title", "T", "--text", "X", "--topic", "Rust",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid topics: JavaScript, React, Node"));
}

#[test]
fn test_interactive_mode_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("artdesk")
        .env("ARTDESK_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
