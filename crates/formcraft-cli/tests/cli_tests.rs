//! CLI integration tests using assert_cmd.

use std::sync::Arc;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use formcraft_core::FormRepository;
use formcraft_server::AppState;

fn formcraft() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("formcraft").unwrap()
}

const VALID_FORM: &str = r#"{
  "name": "Satisfaction",
  "description": "d",
  "questions": [{
    "title": "Q1",
    "description": "d1",
    "type": "score",
    "scoreRanges": [{"title": "Low", "min": 0, "max": 3}],
    "isRequired": true
  }]
}"#;

const INVALID_FORM: &str = r#"{
  "formName": "",
  "description": "d",
  "questions": [{
    "title": "Q1",
    "questionText": "d1",
    "questionType": "score",
    "scoreRanges": [
      {"title": "Low", "min": 0, "max": 3},
      {"title": "High", "min": 2, "max": 10}
    ]
  }]
}"#;

fn write_form(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn check_valid_form() {
    let dir = TempDir::new().unwrap();
    let path = write_form(&dir, "valid.json", VALID_FORM);

    formcraft()
        .arg("check")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Satisfaction (1 questions)"))
        .stdout(predicate::str::contains("1. Q1 [score]"))
        .stdout(predicate::str::contains("Form is valid"));
}

#[test]
fn check_invalid_form_lists_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_form(&dir, "invalid.json", INVALID_FORM);

    formcraft()
        .arg("check")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("[name] Form Name is required"))
        .stdout(predicate::str::contains("[questions[0].scoreRanges]"))
        .stderr(predicate::str::contains("2 validation error(s)"));
}

#[test]
fn check_nonexistent_file() {
    formcraft()
        .arg("check")
        .arg("--file")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn check_rejects_non_json() {
    let dir = TempDir::new().unwrap();
    let path = write_form(&dir, "broken.json", "{ not json");

    formcraft()
        .arg("check")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse form file"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    formcraft()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created formcraft.toml"))
        .stdout(predicate::str::contains("Created forms/example.json"));

    assert!(dir.path().join("formcraft.toml").exists());

    formcraft()
        .current_dir(dir.path())
        .arg("check")
        .arg("--file")
        .arg("forms/example.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Form is valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    formcraft()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    formcraft()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn list_against_unreachable_server_fails() {
    formcraft()
        .arg("list")
        .arg("--api-url")
        .arg("http://127.0.0.1:1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn submit_then_list_against_live_server() {
    let repo = Arc::new(FormRepository::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(formcraft_server::serve(
        listener,
        AppState::new(Arc::clone(&repo)),
        std::future::pending(),
    ));

    let dir = TempDir::new().unwrap();
    let path = write_form(&dir, "valid.json", VALID_FORM);

    let submit_base = base.clone();
    tokio::task::spawn_blocking(move || {
        formcraft()
            .arg("submit")
            .arg("--file")
            .arg(&path)
            .arg("--api-url")
            .arg(&submit_base)
            .assert()
            .success()
            .stdout(predicate::str::contains("Saved form Satisfaction"));
    })
    .await
    .unwrap();
    assert_eq!(repo.len(), 1);

    tokio::task::spawn_blocking(move || {
        formcraft()
            .arg("list")
            .arg("--api-url")
            .arg(&base)
            .assert()
            .success()
            .stdout(predicate::str::contains("Satisfaction"))
            .stdout(predicate::str::contains("1 form(s)"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn submit_with_unknown_id_reports_save_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(formcraft_server::serve(
        listener,
        AppState::default(),
        std::future::pending(),
    ));

    let dir = TempDir::new().unwrap();
    let path = write_form(&dir, "valid.json", VALID_FORM);

    tokio::task::spawn_blocking(move || {
        formcraft()
            .arg("submit")
            .arg("--file")
            .arg(&path)
            .arg("--id")
            .arg("missing")
            .arg("--api-url")
            .arg(&base)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to save form"));
    })
    .await
    .unwrap();
}
