use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("alice:correct")
const ALICE_CORRECT: &str = "Basic YWxpY2U6Y29ycmVjdA==";

fn write_session(home: &Path) {
    fs::write(
        home.join("auth.json"),
        r#"{"username": "alice", "password": "correct"}"#,
    )
    .unwrap();
}

async fn mount_identity(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .and(header("authorization", ALICE_CORRECT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "username": "alice",
        })))
        .mount(server)
        .await;
}

async fn mount_todos(server: &MockServer, tasks: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(header("authorization", ALICE_CORRECT))
        .respond_with(ResponseTemplate::new(200).set_body_json(tasks))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_prints_tasks_with_completion_marks() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();
    write_session(home.path());

    mount_identity(&server).await;
    mount_todos(
        &server,
        serde_json::json!([
            {"id": 1, "title": "buy milk", "completed": false},
            {"id": 2, "title": "water plants", "completed": true},
        ]),
    )
    .await;

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", home.path())
        .env("TASKPAD_BASE_URL", server.uri())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ]    1  buy milk"))
        .stdout(predicate::str::contains("[x]    2  water plants"));
}

#[tokio::test]
async fn test_list_empty() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();
    write_session(home.path());

    mount_identity(&server).await;
    mount_todos(&server, serde_json::json!([])).await;

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", home.path())
        .env("TASKPAD_BASE_URL", server.uri())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks."));
}

#[tokio::test]
async fn test_add_creates_and_refetches() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();
    write_session(home.path());

    mount_identity(&server).await;
    mount_todos(
        &server,
        serde_json::json!([
            {"id": 1, "title": "buy milk", "completed": false},
        ]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/todos"))
        .and(header("authorization", ALICE_CORRECT))
        .and(body_json(serde_json::json!({"title": "buy milk"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 1,
            "title": "buy milk",
            "completed": false,
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", home.path())
        .env("TASKPAD_BASE_URL", server.uri())
        .args(["add", "buy milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'buy milk' (1 task(s) total)"));
}

#[tokio::test]
async fn test_add_rejects_blank_title_without_creating() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();
    write_session(home.path());

    mount_identity(&server).await;

    Mock::given(method("POST"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", home.path())
        .env("TASKPAD_BASE_URL", server.uri())
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task title is empty"));
}

#[tokio::test]
async fn test_toggle_sends_inverted_state() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();
    write_session(home.path());

    mount_identity(&server).await;
    mount_todos(
        &server,
        serde_json::json!([
            {"id": 3, "title": "buy milk", "completed": false},
        ]),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path("/todos/3"))
        .and(header("authorization", ALICE_CORRECT))
        .and(body_json(serde_json::json!({
            "title": "buy milk",
            "completed": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 3,
            "title": "buy milk",
            "completed": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", home.path())
        .env("TASKPAD_BASE_URL", server.uri())
        .args(["toggle", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked task 3 as done"));
}

#[tokio::test]
async fn test_toggle_unknown_id_fails_before_mutating() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();
    write_session(home.path());

    mount_identity(&server).await;
    mount_todos(
        &server,
        serde_json::json!([
            {"id": 1, "title": "buy milk", "completed": false},
        ]),
    )
    .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", home.path())
        .env("TASKPAD_BASE_URL", server.uri())
        .args(["toggle", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no task with id 99"));
}

#[tokio::test]
async fn test_rm_deletes_task() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();
    write_session(home.path());

    mount_identity(&server).await;
    mount_todos(&server, serde_json::json!([])).await;

    Mock::given(method("DELETE"))
        .and(path("/todos/5"))
        .and(header("authorization", ALICE_CORRECT))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", home.path())
        .env("TASKPAD_BASE_URL", server.uri())
        .args(["rm", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed task 5"));
}

#[tokio::test]
async fn test_rm_missing_task_reports_service_error() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();
    write_session(home.path());

    mount_identity(&server).await;
    mount_todos(&server, serde_json::json!([])).await;

    Mock::given(method("DELETE"))
        .and(path("/todos/5"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "not found"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", home.path())
        .env("TASKPAD_BASE_URL", server.uri())
        .args(["rm", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("request failed (404"));
}

#[test]
fn test_task_commands_require_login() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("taskpad")
        .env("TASKPAD_HOME", home.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in."));
}
