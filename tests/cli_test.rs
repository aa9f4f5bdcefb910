/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary against temporary project directories
mod common;

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use common::{MINIMAL_CONFIG, OPTIONAL_UPDATES_CONFIG, ProjectDirBuilder};
use predicates::prelude::*;

fn contextflow(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_contextflow"));
    cmd.arg("-C").arg(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_no_command_shows_help_message() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_contextflow"));
    cmd.assert().success().stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_contextflow"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("cleanup"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_contextflow"));
    cmd.arg("--version").assert().success().stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_contextflow"));
    cmd.arg("invalid-command").assert().failure();
}

#[test]
fn test_cli_templates_lists_all() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_contextflow"));
    cmd.arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("software-development"))
        .stdout(predicate::str::contains("academic-research"))
        .stdout(predicate::str::contains("minimal"));
}

#[test]
fn test_cli_init_creates_project() {
    let project = ProjectDirBuilder::new();

    contextflow(project.path())
        .args(["init", "--template", "side-project", "--name", "Garden"])
        .args(["--description", "Plant tracker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project initialized with template: side-project"));

    let config = fs::read_to_string(project.path().join("contextflow.toml")).unwrap();
    assert!(config.contains("name = \"Garden\""));
    assert!(project.path().join("ai-context/SIDE_PROJECT_CONTEXT.txt").is_file());
    assert!(project.path().join("session-logs").is_dir());
}

#[test]
fn test_cli_init_refuses_to_overwrite() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG);

    contextflow(project.path())
        .args(["init", "--name", "Again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_cli_init_unknown_template() {
    let project = ProjectDirBuilder::new();

    contextflow(project.path())
        .args(["init", "--template", "startup", "--name", "X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown template: startup"));
}

#[test]
fn test_cli_update_records_session() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG);

    contextflow(project.path())
        .args(["update", "Implemented PROJ-42 fix in src/app.py with full test coverage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session documentation updated successfully!"))
        .stdout(predicate::str::contains("Total sessions: 1"));

    assert_eq!(project.session_count(), 1);
}

#[test]
fn test_cli_update_rejects_noncompliant_summary() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG);

    contextflow(project.path())
        .args(["update", "short"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Work item references are required"))
        .stdout(predicate::str::contains("Session summary is very short"));

    assert_eq!(project.session_count(), 0);
}

#[test]
fn test_cli_update_when_not_mandatory() {
    let project = ProjectDirBuilder::new().with_config(OPTIONAL_UPDATES_CONFIG);

    contextflow(project.path())
        .args(["update", "anything at all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not mandatory"));

    assert_eq!(project.session_count(), 0);
}

#[test]
fn test_cli_logs_shows_sanitized_summaries() {
    let long = format!("Fixed PROJ-9 \x1b[31m{}", "y".repeat(120));
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG).with_session(&long, 1);

    contextflow(project.path())
        .arg("logs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session Logs"))
        .stdout(predicate::str::contains("Fixed PROJ-9 yyy"))
        .stdout(predicate::str::contains("\x1b[31m").not())
        .stdout(predicate::str::contains(format!("{}...", "y".repeat(67))));
}

#[test]
fn test_cli_logs_recent_and_count() {
    let project = ProjectDirBuilder::new()
        .with_config(MINIMAL_CONFIG)
        .with_session("Newest session", 1)
        .with_session("Middle session", 2)
        .with_session("Old session", 20);

    contextflow(project.path())
        .args(["logs", "--recent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Newest session"))
        .stdout(predicate::str::contains("Old session").not());

    contextflow(project.path())
        .args(["logs", "--count", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Newest session"))
        .stdout(predicate::str::contains("Middle session").not());
}

#[test]
fn test_cli_logs_empty() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG);

    contextflow(project.path())
        .arg("logs")
        .assert()
        .success()
        .stdout(predicate::str::contains("No session logs found"));
}

#[test]
fn test_cli_context_refresh_and_quick() {
    let project =
        ProjectDirBuilder::new().with_config(MINIMAL_CONFIG).with_session("Closed PROJ-5", 1);

    contextflow(project.path())
        .args(["context", "--refresh", "--quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PROJECT: Test Project"))
        .stdout(predicate::str::contains("- PROJ-5"));
}

#[test]
fn test_cli_context_quick_missing() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG);

    contextflow(project.path())
        .args(["context", "--quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick context file not found"));
}

#[test]
fn test_cli_status() {
    let project =
        ProjectDirBuilder::new().with_config(MINIMAL_CONFIG).with_session("Did PROJ-1", 3);

    contextflow(project.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Test Project"))
        .stdout(predicate::str::contains("Total Sessions: 1"))
        .stdout(predicate::str::contains("Recommendations"));
}

#[test]
fn test_cli_status_json() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG);

    let output = contextflow(project.path()).args(["status", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["project"]["name"], "Test Project");
    assert_eq!(json["status"]["statistics"]["total_sessions"], 0);
    assert!(json["recommendations"].as_array().is_some_and(|r| !r.is_empty()));
}

#[test]
fn test_cli_cleanup() {
    let project = ProjectDirBuilder::new()
        .with_config(MINIMAL_CONFIG)
        .with_session("Ancient work", 400)
        .with_session("Current work", 1);

    contextflow(project.path())
        .arg("cleanup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived: 1"));

    assert_eq!(project.session_count(), 1);

    contextflow(project.path())
        .arg("cleanup")
        .assert()
        .success()
        .stdout(predicate::str::contains("No session logs older than 90 days"));
}

#[test]
fn test_cli_invalid_config_fails() {
    let project = ProjectDirBuilder::new().with_config("[integrations.trello]\nenabled = true\n");

    contextflow(project.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown integration: trello"));
}
