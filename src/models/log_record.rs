use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Location of a persisted session log record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHandle {
    /// Second-granularity identifier, `YYYYMMDD_HHMMSS`
    pub id: String,
    pub path: PathBuf,
}

/// Persisted session update as read back from the log directory
///
/// Counts are stored in the record itself so listing never re-parses the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLogRecord {
    pub id: String,
    pub path: PathBuf,
    pub modified: DateTime<Local>,
    pub project_name: String,
    pub project_type: String,
    pub timestamp: String,
    pub summary: String,
    pub categories: Vec<String>,
    pub work_items: Vec<String>,
    pub work_item_count: usize,
    pub file_count: usize,
    pub feature_count: usize,
    pub bug_count: usize,
}

impl SessionLogRecord {
    /// `YYYY-MM-DD HH:MM` rendering of the identifier, falling back to the raw id
    pub fn display_date(&self) -> String {
        let id = &self.id;
        if id.len() == 15 && id.is_ascii() && id.as_bytes()[8] == b'_' {
            format!("{}-{}-{} {}:{}", &id[..4], &id[4..6], &id[6..8], &id[9..11], &id[11..13])
        } else {
            id.clone()
        }
    }
}
