//! Workflow compliance rules for session summaries

use std::sync::LazyLock;

use regex::Regex;

use crate::config::WorkflowPolicy;
use crate::models::ValidationResult;
use crate::parsers::PatternExtractor;

pub const MISSING_WORK_ITEMS: &str = "Work item references are required but none found. \
     Include references like PROJ-123, #456, or issue-789.";
pub const SHORT_SUMMARY: &str =
    "Session summary is very short. Consider adding more detail about what was accomplished.";
pub const MISSING_ACTION_WORDS: &str = "Consider including action words like 'implemented', \
     'fixed', 'added', 'updated' to clarify what was done.";
pub const MISSING_FILE_REFERENCES: &str =
    "Consider mentioning specific files that were modified to help track changes.";

/// Summaries shorter than this (after trimming) draw a warning
const MIN_SUMMARY_CHARS: usize = 20;

const ACTION_WORDS: &[&str] = &[
    "implemented",
    "added",
    "created",
    "built",
    "developed",
    "fixed",
    "resolved",
    "corrected",
    "repaired",
    "updated",
    "modified",
    "changed",
    "improved",
    "refactored",
    "optimized",
    "enhanced",
    "tested",
    "validated",
    "verified",
    "documented",
    "wrote",
    "drafted",
];

static FILE_HINT_PATTERNS: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        Regex::new(r"\w+\.\w+").expect("valid filename regex"),
        Regex::new(r"src/\w+").expect("valid src regex"),
        Regex::new(r"lib/\w+").expect("valid lib regex"),
        Regex::new(r"components/\w+").expect("valid components regex"),
        Regex::new(r"pages/\w+").expect("valid pages regex"),
    ]
});

/// Sink for validation feedback shown to the user
///
/// The CLI prints to the console; other front ends may collect or forward it.
pub trait Notifier {
    fn notify(&mut self, errors: &[String], warnings: &[String], suggestions: &[String]);
}

/// Checks summaries against the configured [`WorkflowPolicy`]
#[derive(Debug, Clone)]
pub struct ComplianceValidator {
    policy: WorkflowPolicy,
    extractor: PatternExtractor,
}

impl ComplianceValidator {
    pub fn new(policy: WorkflowPolicy) -> Self {
        Self { policy, extractor: PatternExtractor::new() }
    }

    pub fn policy(&self) -> &WorkflowPolicy {
        &self.policy
    }

    /// Evaluate every rule; no rule short-circuits another
    pub fn validate(&self, summary: &str) -> ValidationResult {
        let mut result = ValidationResult::new();

        if self.policy.require_work_item_references && !self.extractor.has_work_items(summary) {
            result.add_error(MISSING_WORK_ITEMS);
        }

        if summary.trim().chars().count() < MIN_SUMMARY_CHARS {
            result.add_warning(SHORT_SUMMARY);
        }

        if !has_action_words(summary) {
            result.add_suggestion(MISSING_ACTION_WORDS);
        }

        if !has_file_hints(summary) {
            result.add_suggestion(MISSING_FILE_REFERENCES);
        }

        result
    }

    /// Gate a session update on the policy
    ///
    /// Always passes when session updates are not mandatory. Otherwise the
    /// full result is reported to `notifier`, even when clean, and its
    /// `valid` flag returned.
    pub fn enforce(&self, summary: &str, notifier: &mut dyn Notifier) -> bool {
        if !self.policy.mandatory_session_updates {
            return true;
        }

        let result = self.validate(summary);
        notifier.notify(&result.errors, &result.warnings, &result.suggestions);
        result.valid
    }
}

fn has_action_words(text: &str) -> bool {
    let lower = text.to_lowercase();
    ACTION_WORDS.iter().any(|word| lower.contains(word))
}

fn has_file_hints(text: &str) -> bool {
    FILE_HINT_PATTERNS.iter().any(|pattern| pattern.is_match(text))
}
