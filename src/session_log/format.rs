//! Session record file format
//!
//! One markdown file per session, named `session_<YYYYMMDD>_<HHMMSS>.md`:
//!
//! ```text
//! # ContextFlow Session Log
//!
//! **Project:** <name>
//! **Type:** <type>
//! **Timestamp:** <ISO-8601>
//!
//! ## Session Summary
//!
//! <verbatim summary>
//!
//! ## Parsed Updates
//!
//! **Categories:** feature, bugfix
//! **Work Items:** 2
//! ...
//! ### Work Items Referenced
//! - PROJ-1
//! ```
//!
//! List sections are only written when non-empty.

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::models::SessionUpdate;

pub const RECORD_PREFIX: &str = "session_";
pub const RECORD_EXTENSION: &str = ".md";

const TITLE: &str = "# ContextFlow Session Log";
const SUMMARY_HEADING: &str = "## Session Summary\n\n";
const UPDATES_HEADING: &str = "\n\n## Parsed Updates\n\n";
const WORK_ITEMS_HEADING: &str = "### Work Items Referenced";

/// Second-granularity record identifier for `timestamp`
pub fn record_id(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%Y%m%d_%H%M%S").to_string()
}

pub fn record_file_name(id: &str) -> String {
    format!("{}{}{}", RECORD_PREFIX, id, RECORD_EXTENSION)
}

/// Identifier of a file named like a session record, `None` for anything else
pub fn id_from_file_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(RECORD_PREFIX)?
        .strip_suffix(RECORD_EXTENSION)
        .filter(|id| !id.is_empty())
}

/// Render `update` as a session record body
pub fn render_record(update: &SessionUpdate, project_name: &str) -> String {
    let mut out = String::with_capacity(update.raw_summary.len() + 512);

    // Writing to a String cannot fail
    let _ = write!(
        out,
        "{TITLE}\n\n\
         **Project:** {project_name}\n\
         **Type:** {}\n\
         **Timestamp:** {}\n\n",
        update.project_type,
        update.iso_timestamp(),
    );
    let _ = write!(out, "{SUMMARY_HEADING}{}{UPDATES_HEADING}", update.raw_summary);
    let _ = write!(
        out,
        "**Categories:** {}\n\
         **Work Items:** {}\n\
         **Files Changed:** {}\n\
         **Features Added:** {}\n\
         **Bugs Fixed:** {}\n\n",
        update.category_list(),
        update.work_items.len(),
        update.files_changed.len(),
        update.features_added.len(),
        update.bugs_fixed.len(),
    );

    write_section(&mut out, WORK_ITEMS_HEADING, update.work_items.iter());
    write_section(&mut out, "### Files Changed", update.files_changed.iter());
    write_section(&mut out, "### Features Added", update.features_added.iter());
    write_section(&mut out, "### Bugs Fixed", update.bugs_fixed.iter());

    out
}

fn write_section<'a>(
    out: &mut String,
    heading: &str,
    items: impl ExactSizeIterator<Item = &'a String>,
) {
    if items.len() == 0 {
        return;
    }
    out.push_str(heading);
    out.push('\n');
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
    out.push('\n');
}

/// Fields recovered from a record body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRecord {
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

/// Read a record body back
///
/// Returns `None` when the body has no summary section. Missing header fields
/// or counts default to empty/zero.
pub fn parse_record(content: &str) -> Option<ParsedRecord> {
    let summary_start = content.find(SUMMARY_HEADING)? + SUMMARY_HEADING.len();
    let header = &content[..summary_start];
    let rest = &content[summary_start..];

    let (summary, updates) = match rest.rfind(UPDATES_HEADING) {
        Some(end) => (&rest[..end], &rest[end + UPDATES_HEADING.len()..]),
        // Older or hand-edited records: the summary runs to the first blank line
        None => match rest.find("\n\n") {
            Some(end) => (&rest[..end], ""),
            None => (rest, ""),
        },
    };

    Some(ParsedRecord {
        project_name: field(header, "**Project:**").unwrap_or_default(),
        project_type: field(header, "**Type:**").unwrap_or_default(),
        timestamp: field(header, "**Timestamp:**").unwrap_or_default(),
        summary: summary.trim().to_string(),
        categories: field(updates, "**Categories:**")
            .map(|list| {
                list.split(',').map(str::trim).filter(|c| !c.is_empty()).map(String::from).collect()
            })
            .unwrap_or_default(),
        work_items: section_items(updates, WORK_ITEMS_HEADING),
        work_item_count: count(updates, "**Work Items:**"),
        file_count: count(updates, "**Files Changed:**"),
        feature_count: count(updates, "**Features Added:**"),
        bug_count: count(updates, "**Bugs Fixed:**"),
    })
}

fn field(block: &str, label: &str) -> Option<String> {
    block.lines().find_map(|line| line.strip_prefix(label)).map(|value| value.trim().to_string())
}

fn count(block: &str, label: &str) -> usize {
    field(block, label).and_then(|value| value.parse().ok()).unwrap_or(0)
}

fn section_items(block: &str, heading: &str) -> Vec<String> {
    block
        .lines()
        .skip_while(|line| *line != heading)
        .skip(1)
        .take_while(|line| !line.trim().is_empty())
        .filter_map(|line| line.strip_prefix("- "))
        .map(String::from)
        .collect()
}
