//! Work-item and file-reference extraction
//!
//! Pure heuristics over raw text: no filesystem checks, no attempt to filter
//! false positives such as version numbers that happen to look like `word.ext`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Work-item patterns, applied independently and unioned.
///
/// The project-key form is case-sensitive: lowercase keys such as `proj-1`
/// never match it. The keyword forms match in any case.
static WORK_ITEM_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"[A-Z]+-\d+").expect("valid project-key regex"),
        Regex::new(r"(?i)#\d+").expect("valid hash regex"),
        Regex::new(r"(?i)issue-\d+").expect("valid issue regex"),
        Regex::new(r"(?i)task-\d+").expect("valid task regex"),
    ]
});

static FILE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"[a-zA-Z0-9/_.-]+\.[a-zA-Z]+").expect("valid extension regex"),
        Regex::new(r"src/[a-zA-Z0-9/_.-]+").expect("valid src regex"),
        Regex::new(r"docs/[a-zA-Z0-9/_.-]+").expect("valid docs regex"),
    ]
});

/// Stateless extractor of references embedded in free text
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Collect ticket/issue/task references such as `PROJ-123`, `#456`, `issue-789`, `task-42`
    pub fn extract_work_items(&self, text: &str) -> BTreeSet<String> {
        collect_matches(WORK_ITEM_PATTERNS.iter(), text)
    }

    /// Collect path-like tokens: anything with an alphabetic extension, or under `src/` or `docs/`
    pub fn extract_file_references(&self, text: &str) -> BTreeSet<String> {
        collect_matches(FILE_PATTERNS.iter(), text)
    }

    pub fn has_work_items(&self, text: &str) -> bool {
        WORK_ITEM_PATTERNS.iter().any(|pattern| pattern.is_match(text))
    }
}

fn collect_matches<'a>(patterns: impl Iterator<Item = &'a Regex>, text: &str) -> BTreeSet<String> {
    patterns
        .flat_map(|pattern| pattern.find_iter(text).map(|m| m.as_str().to_string()))
        .collect()
}
