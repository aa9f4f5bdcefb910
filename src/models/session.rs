use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Kind of work a session summary describes
///
/// Variant order is the order categories are checked in and rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Feature,
    Bugfix,
    Architecture,
    Documentation,
}

impl Category {
    pub const ALL: [Category; 4] =
        [Category::Feature, Category::Bugfix, Category::Architecture, Category::Documentation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Feature => "feature",
            Category::Bugfix => "bugfix",
            Category::Architecture => "architecture",
            Category::Documentation => "documentation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feature" => Ok(Category::Feature),
            "bugfix" => Ok(Category::Bugfix),
            "architecture" => Ok(Category::Architecture),
            "documentation" => Ok(Category::Documentation),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// Structured update parsed from one free-text session summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub raw_summary: String,
    pub timestamp: DateTime<Local>,
    pub project_type: String,
    pub work_items: BTreeSet<String>,
    pub files_changed: BTreeSet<String>,
    pub categories: BTreeSet<Category>,
    pub features_added: Vec<String>,
    pub bugs_fixed: Vec<String>,
    pub architecture_changes: Vec<String>,
    pub documentation_updates: Vec<String>,
}

impl SessionUpdate {
    /// ISO-8601 timestamp as written into session log records
    pub fn iso_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Category names joined the way log records list them
    pub fn category_list(&self) -> String {
        self.categories.iter().map(Category::as_str).collect::<Vec<_>>().join(", ")
    }
}
