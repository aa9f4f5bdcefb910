//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{Duration as ChronoDuration, Local};
use contextflow::SessionParser;
use contextflow::session_log::format::{record_file_name, record_id, render_record};
use tempfile::TempDir;

pub const LOG_DIR: &str = "session-logs";

/// Builder for a throwaway project directory
pub struct ProjectDirBuilder {
    temp_dir: TempDir,
}

impl ProjectDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `contextflow.toml` with the given content
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("contextflow.toml", content)
    }

    /// Write a file relative to the project root, creating parent directories
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        self
    }

    pub fn with_dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.temp_dir.path().join(relative)).expect("Failed to create dir");
        self
    }

    /// Add a session record written `days_old` days ago (timestamp and mtime)
    pub fn with_session(self, summary: &str, days_old: u64) -> Self {
        let when = Local::now()
            - ChronoDuration::days(days_old as i64)
            - ChronoDuration::seconds(self.session_count() as i64);
        let update = SessionParser::new().parse_at(summary, "software-development", when);
        let log_dir = self.temp_dir.path().join(LOG_DIR);
        fs::create_dir_all(&log_dir).expect("Failed to create log dir");

        let path = log_dir.join(record_file_name(&record_id(&update.timestamp)));
        fs::write(&path, render_record(&update, "Test Project")).expect("Failed to write record");
        backdate(&path, days_old);
        self
    }

    pub fn log_dir(&self) -> PathBuf {
        self.temp_dir.path().join(LOG_DIR)
    }

    /// Session record files directly in the log directory
    pub fn session_count(&self) -> usize {
        fs::read_dir(self.log_dir())
            .map(|entries| {
                entries
                    .flatten()
                    .filter(|e| e.file_name().to_string_lossy().starts_with("session_"))
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ProjectDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Set a file's modification time to `days` days ago
pub fn backdate(path: &Path, days: u64) {
    let when = SystemTime::now() - Duration::from_secs(days * 24 * 60 * 60);
    File::options()
        .write(true)
        .open(path)
        .and_then(|file| file.set_modified(when))
        .expect("Failed to set modification time");
}

/// Files (not directories) under `dir`, recursively
pub fn files_under(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

pub const MINIMAL_CONFIG: &str = r#"
[project]
name = "Test Project"
description = "Integration test project"
type = "software-development"
"#;

pub const OPTIONAL_UPDATES_CONFIG: &str = r#"
[project]
name = "Relaxed"

[workflow]
mandatory_session_updates = false
"#;
