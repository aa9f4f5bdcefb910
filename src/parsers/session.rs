use chrono::{DateTime, Local};

use super::classifier::Classifier;
use super::patterns::PatternExtractor;
use crate::models::SessionUpdate;

/// Turns a free-text session summary into a [`SessionUpdate`]
///
/// Parsing never fails: text without any recognizable references or keywords
/// simply produces empty collections.
#[derive(Debug, Clone, Default)]
pub struct SessionParser {
    extractor: PatternExtractor,
    classifier: Classifier,
}

impl SessionParser {
    pub fn new() -> Self {
        Self { extractor: PatternExtractor::new(), classifier: Classifier::new() }
    }

    /// Parse `raw_summary`, stamping the result with the current local time
    pub fn parse(&self, raw_summary: &str, project_type: &str) -> SessionUpdate {
        self.parse_at(raw_summary, project_type, Local::now())
    }

    /// Parse with an explicit timestamp; identical input yields an identical update
    pub fn parse_at(
        &self,
        raw_summary: &str,
        project_type: &str,
        timestamp: DateTime<Local>,
    ) -> SessionUpdate {
        let classification = self.classifier.classify(raw_summary);

        SessionUpdate {
            raw_summary: raw_summary.to_string(),
            timestamp,
            project_type: project_type.to_string(),
            work_items: self.extractor.extract_work_items(raw_summary),
            files_changed: self.extractor.extract_file_references(raw_summary),
            categories: classification.categories,
            features_added: classification.features,
            bugs_fixed: classification.bug_fixes,
            architecture_changes: classification.architecture_changes,
            documentation_updates: classification.documentation_updates,
        }
    }
}
