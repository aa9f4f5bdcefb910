/// Edge case integration tests
///
/// These tests cover filesystem quirks, unusual summaries, and configuration mistakes
mod common;

use std::fs;

use chrono::{Local, TimeZone};
use contextflow::context::ContextFacts;
use contextflow::error::ConfigError;
use contextflow::{ComplianceValidator, SessionLogStore, SessionParser, Workspace};
use common::{MINIMAL_CONFIG, ProjectDirBuilder};

#[test]
fn test_edge_case_malformed_record_is_skipped() {
    let project = ProjectDirBuilder::new()
        .with_config(MINIMAL_CONFIG)
        .with_session("Valid session PROJ-1", 1)
        .with_file("session-logs/session_20240101_120000.md", "not a session record at all")
        .build();
    let workspace = Workspace::discover(project.path()).unwrap();

    let records = SessionLogStore::for_workspace(&workspace).list().unwrap();

    assert_eq!(records.len(), 1, "Malformed record should be skipped");
    assert!(records[0].summary.contains("PROJ-1"));
}

#[test]
fn test_edge_case_foreign_files_ignored() {
    let project = ProjectDirBuilder::new()
        .with_config(MINIMAL_CONFIG)
        .with_session("Real session", 1)
        .with_file("session-logs/notes.md", "# Notes")
        .with_file("session-logs/session_backup.txt", "stray")
        .with_dir("session-logs/session_20240101_000000.md.d")
        .build();
    let workspace = Workspace::discover(project.path()).unwrap();

    let records = SessionLogStore::for_workspace(&workspace).list().unwrap();

    assert_eq!(records.len(), 1);
}

#[test]
fn test_edge_case_missing_log_directory() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG).build();
    let workspace = Workspace::discover(project.path()).unwrap();
    let store = SessionLogStore::for_workspace(&workspace);

    assert!(store.list().unwrap().is_empty());
    let stats = store.statistics().unwrap();
    assert_eq!(stats.total_sessions, 0);
    assert!(stats.last_session.is_none());

    let report = store.prune_expired(&workspace.config.workflow).unwrap();
    assert_eq!(report.archived + report.deleted, 0);
}

#[test]
fn test_edge_case_empty_summary() {
    let update = SessionParser::new().parse("", "minimal");
    assert!(update.work_items.is_empty());
    assert!(update.files_changed.is_empty());
    assert!(update.categories.is_empty());

    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG);
    let workspace = Workspace::discover(project.path()).unwrap();
    let result = ComplianceValidator::new(workspace.config.workflow.clone()).validate("   ");
    assert!(!result.valid);
    assert_eq!(result.warnings.len(), 1, "Blank summary should count as very short");
}

#[test]
fn test_edge_case_unicode_summary_round_trips() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG).build();
    let workspace = Workspace::discover(project.path()).unwrap();
    let store = SessionLogStore::for_workspace(&workspace);

    let summary = "Implemented Übersetzung für PROJ-9 🚀 in src/i18n/de.rs";
    let update = SessionParser::new().parse(summary, "software-development");
    store.append(&update).unwrap();

    let records = store.list().unwrap();
    assert_eq!(records[0].summary, summary);
    assert!(records[0].work_items.contains(&"PROJ-9".to_string()));
}

#[test]
fn test_edge_case_summary_with_blank_lines() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG).build();
    let workspace = Workspace::discover(project.path()).unwrap();
    let store = SessionLogStore::for_workspace(&workspace);

    let summary = "Fixed login bug PROJ-3\n\n\nUpdated README.md afterwards";
    store.append(&SessionParser::new().parse(summary, "software-development")).unwrap();

    let records = store.list().unwrap();
    assert_eq!(records[0].summary, summary);
    assert_eq!(records[0].bug_count, 1);
}

#[test]
fn test_edge_case_same_second_append_keeps_latest() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG).build();
    let workspace = Workspace::discover(project.path()).unwrap();
    let store = SessionLogStore::for_workspace(&workspace);
    let parser = SessionParser::new();
    let when = Local.with_ymd_and_hms(2025, 3, 4, 9, 15, 0).unwrap();

    let first = store.append(&parser.parse_at("First take on PROJ-1", "t", when)).unwrap();
    let second = store.append(&parser.parse_at("Second take on PROJ-1", "t", when)).unwrap();

    assert_eq!(first.path, second.path);
    let records = store.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].summary, "Second take on PROJ-1");
}

#[test]
fn test_edge_case_lowercase_keys_are_not_work_items() {
    let update = SessionParser::new().parse("bumped utf-8 handling, see proj-12", "t");
    assert!(update.work_items.is_empty());
}

#[test]
fn test_edge_case_unknown_integration_rejected() {
    let project = ProjectDirBuilder::new()
        .with_config("[project]\nname = \"X\"\n\n[integrations.trello]\nenabled = true\n")
        .build();

    let err = Workspace::discover(project.path()).unwrap_err();

    assert!(matches!(err, ConfigError::UnknownIntegration(_)));
}

#[test]
fn test_edge_case_invalid_toml_reports_path() {
    let project = ProjectDirBuilder::new().with_config("[project\nname = ").build();

    let err = Workspace::discover(project.path()).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("contextflow.toml"));
}

#[test]
fn test_edge_case_config_found_from_subdirectory() {
    let project =
        ProjectDirBuilder::new().with_config(MINIMAL_CONFIG).with_dir("src/deep/nested").build();

    let workspace = Workspace::discover(&project.path().join("src/deep/nested")).unwrap();

    assert_eq!(workspace.root, project.path());
    assert_eq!(workspace.config.project.name, "Test Project");
}

#[test]
fn test_edge_case_context_without_any_sessions() {
    let project = ProjectDirBuilder::new().with_config(MINIMAL_CONFIG).build();
    let workspace = Workspace::discover(project.path()).unwrap();
    let store = SessionLogStore::for_workspace(&workspace);

    let facts = ContextFacts::gather(&workspace, &store).unwrap();

    assert!(facts.recent_changes.is_empty());
    assert!(facts.work_items.is_empty());
    assert!(facts.structure.key_directories.is_empty());
}

#[test]
fn test_edge_case_unreadable_context_dir_name_collision() {
    // A plain file where the context directory should be
    let project = ProjectDirBuilder::new()
        .with_config(MINIMAL_CONFIG)
        .with_file("ai-context", "oops")
        .build();
    let workspace = Workspace::discover(project.path()).unwrap();
    let store = SessionLogStore::for_workspace(&workspace);

    assert!(contextflow::context::regenerate(&workspace, &store).is_err());
    assert!(fs::metadata(project.path().join("ai-context")).unwrap().is_file());
}
