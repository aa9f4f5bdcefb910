//! Append-only session log directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Local};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::format::{id_from_file_name, parse_record, record_file_name, record_id, render_record};
use crate::config::{Workspace, WorkflowPolicy};
use crate::error::LogStoreError;
use crate::models::{RecordHandle, SessionLogRecord, SessionUpdate};

/// Window used for the "recent sessions" count
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Number of weeks averaged for session frequency
const FREQUENCY_WEEKS: i64 = 8;

const ARCHIVE_DIR: &str = "archive";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatistics {
    pub total_sessions: usize,
    pub recent_sessions: usize,
    pub avg_sessions_per_week: f64,
    pub last_session: Option<DateTime<Local>>,
    pub log_directory: PathBuf,
}

/// Result of applying the retention policy; per-record failures do not stop the batch
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PruneReport {
    pub archived: usize,
    pub deleted: usize,
    pub errors: Vec<String>,
}

/// A record file found in the log directory, before its body is read
#[derive(Debug, Clone)]
struct RecordFile {
    id: String,
    path: PathBuf,
    modified: DateTime<Local>,
}

/// Session records stored as one markdown file each under a log directory
///
/// No locking: concurrent invocations against one directory race, and two
/// appends within the same second share a file name (the later one wins).
#[derive(Debug, Clone)]
pub struct SessionLogStore {
    log_dir: PathBuf,
    project_name: String,
}

impl SessionLogStore {
    pub fn new(log_dir: impl Into<PathBuf>, project_name: impl Into<String>) -> Self {
        Self { log_dir: log_dir.into(), project_name: project_name.into() }
    }

    pub fn for_workspace(workspace: &Workspace) -> Self {
        Self::new(workspace.session_log_dir(), workspace.config.project.name.clone())
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Persist `update` as a new record
    ///
    /// The body is written to a temporary file and renamed into place, so a
    /// record is either fully written or absent.
    pub fn append(&self, update: &SessionUpdate) -> Result<RecordHandle, LogStoreError> {
        fs::create_dir_all(&self.log_dir)
            .map_err(|source| LogStoreError::CreateDir { path: self.log_dir.clone(), source })?;

        let id = record_id(&update.timestamp);
        let path = self.log_dir.join(record_file_name(&id));
        if path.exists() {
            warn!(
                record = %path.display(),
                "session record for this second already exists, overwriting"
            );
        }

        let temp_path = self.log_dir.join(format!("{}.tmp", record_file_name(&id)));
        let body = render_record(update, &self.project_name);
        if let Err(source) = fs::write(&temp_path, body) {
            let _ = fs::remove_file(&temp_path);
            return Err(LogStoreError::Write { path: temp_path, source });
        }
        if let Err(source) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(LogStoreError::Write { path, source });
        }

        info!(record = %path.display(), "session record written");
        Ok(RecordHandle { id, path })
    }

    /// All readable records, newest first by modification time
    pub fn list(&self) -> Result<Vec<SessionLogRecord>, LogStoreError> {
        self.list_filtered(|_| true)
    }

    /// Records accepted by `filter`, newest first by modification time
    ///
    /// Unreadable or unrecognizable files are logged and skipped.
    pub fn list_filtered<F>(&self, filter: F) -> Result<Vec<SessionLogRecord>, LogStoreError>
    where
        F: Fn(&SessionLogRecord) -> bool,
    {
        let mut records = Vec::new();

        for file in self.record_files()? {
            let content = match fs::read_to_string(&file.path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(
                        record = %file.path.display(),
                        error = %e,
                        "skipping unreadable session record"
                    );
                    continue;
                }
            };
            let Some(parsed) = parse_record(&content) else {
                warn!(record = %file.path.display(), "skipping file without a session summary");
                continue;
            };

            let record = SessionLogRecord {
                id: file.id,
                path: file.path,
                modified: file.modified,
                project_name: parsed.project_name,
                project_type: parsed.project_type,
                timestamp: parsed.timestamp,
                summary: parsed.summary,
                categories: parsed.categories,
                work_items: parsed.work_items,
                work_item_count: parsed.work_item_count,
                file_count: parsed.file_count,
                feature_count: parsed.feature_count,
                bug_count: parsed.bug_count,
            };
            if filter(&record) {
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Records modified within the last `days` days, newest first
    pub fn modified_within(&self, days: i64) -> Result<Vec<SessionLogRecord>, LogStoreError> {
        match days_before(Local::now(), days) {
            Some(cutoff) => self.list_filtered(|record| record.modified > cutoff),
            None => self.list(),
        }
    }

    pub fn statistics(&self) -> Result<SessionStatistics, LogStoreError> {
        let files = self.record_files()?;
        let now = Local::now();
        let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
        let frequency_cutoff = now - Duration::weeks(FREQUENCY_WEEKS);

        let recent_sessions = files.iter().filter(|f| f.modified > recent_cutoff).count();
        let weekly_sessions = files.iter().filter(|f| f.modified > frequency_cutoff).count();
        let avg = weekly_sessions as f64 / FREQUENCY_WEEKS as f64;

        Ok(SessionStatistics {
            total_sessions: files.len(),
            recent_sessions,
            avg_sessions_per_week: (avg * 10.0).round() / 10.0,
            last_session: files.first().map(|f| f.modified),
            log_directory: self.log_dir.clone(),
        })
    }

    /// Number of records older than the retention window
    ///
    /// A window reaching past the earliest representable date expires nothing.
    pub fn expired_count(&self, retention_days: u32) -> Result<usize, LogStoreError> {
        let Some(cutoff) = days_before(Local::now(), i64::from(retention_days)) else {
            return Ok(0);
        };
        Ok(self.record_files()?.iter().filter(|f| f.modified < cutoff).count())
    }

    /// Archive or delete records older than `policy.session_log_retention_days`
    ///
    /// With `auto_archive_logs` records move to `archive/<YYYY-MM>/` under the
    /// log directory, otherwise they are removed. A failing record is reported
    /// in [`PruneReport::errors`] and the rest are still processed. A record
    /// whose name is already taken in the archive partition stays in place
    /// and is reported as an error.
    pub fn prune_expired(&self, policy: &WorkflowPolicy) -> Result<PruneReport, LogStoreError> {
        let now = Local::now();
        let mut report = PruneReport::default();
        let Some(cutoff) = days_before(now, i64::from(policy.session_log_retention_days)) else {
            debug!(
                retention_days = policy.session_log_retention_days,
                "retention window exceeds calendar range, nothing expired"
            );
            return Ok(report);
        };

        let expired: Vec<RecordFile> =
            self.record_files()?.into_iter().filter(|f| f.modified < cutoff).collect();
        if expired.is_empty() {
            return Ok(report);
        }

        let archive_dir = self.log_dir.join(ARCHIVE_DIR).join(now.format("%Y-%m").to_string());
        if policy.auto_archive_logs
            && let Err(e) = fs::create_dir_all(&archive_dir)
        {
            // Each rename below will fail and be reported individually
            warn!(
                archive = %archive_dir.display(),
                error = %e,
                "failed to create archive directory"
            );
        }

        for file in expired {
            let name = file
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let outcome = if policy.auto_archive_logs {
                move_into_archive(&file.path, &archive_dir.join(&name))
            } else {
                fs::remove_file(&file.path)
            };

            match outcome {
                Ok(()) if policy.auto_archive_logs => report.archived += 1,
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    warn!(
                        record = %file.path.display(),
                        error = %e,
                        "failed to prune session record"
                    );
                    report.errors.push(format!("Error processing {}: {}", name, e));
                }
            }
        }

        info!(
            archived = report.archived,
            deleted = report.deleted,
            failed = report.errors.len(),
            "pruned session logs"
        );
        Ok(report)
    }

    /// Record files directly under the log directory, newest first
    fn record_files(&self) -> Result<Vec<RecordFile>, LogStoreError> {
        if !self.log_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.log_dir)
            .map_err(|source| LogStoreError::ReadDir { path: self.log_dir.clone(), source })?;

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let file_name = entry.file_name();
            let Some(id) = file_name.to_str().and_then(id_from_file_name) else {
                continue;
            };

            let modified = match entry.metadata().and_then(|m| {
                if m.is_file() { m.modified() } else { Err(std::io::Error::other("not a file")) }
            }) {
                Ok(time) => DateTime::<Local>::from(time),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "ignoring log entry");
                    continue;
                }
            };

            files.push(RecordFile { id: id.to_string(), path, modified });
        }

        files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.id.cmp(&a.id)));
        Ok(files)
    }
}

/// `now` minus `days`, or `None` when that falls outside the calendar range
fn days_before(now: DateTime<Local>, days: i64) -> Option<DateTime<Local>> {
    now.checked_sub_signed(Duration::try_days(days)?)
}

/// Rename `from` to `to`, refusing to replace an existing archived record
fn move_into_archive(from: &Path, to: &Path) -> io::Result<()> {
    if to.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} is already archived", to.display()),
        ));
    }
    fs::rename(from, to)
}
