//! Keyword-driven categorization of session summaries
//!
//! Deliberately simple substring matching, not language understanding. The
//! keyword lists below decide observable categorization; changing them is a
//! behavior change.

use std::collections::BTreeSet;

use crate::models::Category;

const FEATURE_TRIGGERS: &[&str] =
    &["implemented", "added", "created", "new feature", "enhancement"];
const BUGFIX_TRIGGERS: &[&str] = &["fixed", "resolved", "bug", "issue", "error"];
const ARCHITECTURE_TRIGGERS: &[&str] = &["architecture", "design", "refactor", "restructure"];
const DOCUMENTATION_TRIGGERS: &[&str] = &["documentation", "docs", "readme", "guide"];

const FEATURE_ACTIONS: &[&str] = &["implemented", "added", "created", "new"];
const FEATURE_NOUNS: &[&str] = &["feature", "component", "function", "endpoint", "page"];
const BUGFIX_ACTIONS: &[&str] = &["fixed", "resolved", "corrected"];
const ARCHITECTURE_ACTIONS: &[&str] =
    &["architecture", "design", "refactor", "restructure", "migrate"];
const DOCUMENTATION_ACTIONS: &[&str] = &["documentation", "docs", "readme", "guide", "manual"];

/// Categories found in a summary plus the lines supporting each one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub categories: BTreeSet<Category>,
    pub features: Vec<String>,
    pub bug_fixes: Vec<String>,
    pub architecture_changes: Vec<String>,
    pub documentation_updates: Vec<String>,
}

impl Classification {
    pub fn lines_for(&self, category: Category) -> &[String] {
        match category {
            Category::Feature => &self.features,
            Category::Bugfix => &self.bug_fixes,
            Category::Architecture => &self.architecture_changes,
            Category::Documentation => &self.documentation_updates,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    /// Tag `text` with every category whose trigger keywords appear anywhere in it,
    /// then pull out the lines describing each tagged category.
    pub fn classify(&self, text: &str) -> Classification {
        let lower = text.to_lowercase();
        let mut classification = Classification::default();

        for category in Category::ALL {
            if !contains_any(&lower, triggers(category)) {
                continue;
            }
            classification.categories.insert(category);

            let lines = matching_lines(text, category);
            match category {
                Category::Feature => classification.features = lines,
                Category::Bugfix => classification.bug_fixes = lines,
                Category::Architecture => classification.architecture_changes = lines,
                Category::Documentation => classification.documentation_updates = lines,
            }
        }

        classification
    }
}

fn triggers(category: Category) -> &'static [&'static str] {
    match category {
        Category::Feature => FEATURE_TRIGGERS,
        Category::Bugfix => BUGFIX_TRIGGERS,
        Category::Architecture => ARCHITECTURE_TRIGGERS,
        Category::Documentation => DOCUMENTATION_TRIGGERS,
    }
}

fn line_qualifies(line_lower: &str, category: Category) -> bool {
    match category {
        Category::Feature => {
            contains_any(line_lower, FEATURE_ACTIONS) && contains_any(line_lower, FEATURE_NOUNS)
        }
        Category::Bugfix => contains_any(line_lower, BUGFIX_ACTIONS),
        Category::Architecture => contains_any(line_lower, ARCHITECTURE_ACTIONS),
        Category::Documentation => contains_any(line_lower, DOCUMENTATION_ACTIONS),
    }
}

/// Trimmed lines, in input order, that describe `category`
fn matching_lines(text: &str, category: Category) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && line_qualifies(&line.to_lowercase(), category))
        .map(str::to_string)
        .collect()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_category() {
        let result = Classifier::new().classify("Implemented new login feature in auth module");
        assert!(result.categories.contains(&Category::Feature));
        assert_eq!(result.features, vec!["Implemented new login feature in auth module"]);
    }

    #[test]
    fn test_bugfix_category() {
        let result = Classifier::new().classify("Fixed a critical bug in the parser");
        assert!(result.categories.contains(&Category::Bugfix));
        assert_eq!(result.bug_fixes, vec!["Fixed a critical bug in the parser"]);
    }

    #[test]
    fn test_no_categories() {
        let result = Classifier::new().classify("Had a meeting about lunch plans");
        assert!(result.categories.is_empty());
        assert!(result.features.is_empty());
        assert!(result.bug_fixes.is_empty());
    }

    #[test]
    fn test_feature_line_requires_noun() {
        // "added" triggers the category but no line names a feature noun
        let result = Classifier::new().classify("Added retries to the sync job");
        assert!(result.categories.contains(&Category::Feature));
        assert!(result.features.is_empty());
    }

    #[test]
    fn test_category_without_qualifying_lines() {
        // "bug" triggers bugfix, but no line says fixed/resolved/corrected
        let result = Classifier::new().classify("Investigated a bug in caching");
        assert!(result.categories.contains(&Category::Bugfix));
        assert!(result.bug_fixes.is_empty());
    }

    #[test]
    fn test_multi_line_extraction_preserves_order_and_trims() {
        let summary = "  Created user profile page  \n\
                       Resolved crash on startup\n\
                       \n\
                       Refactor of the storage layer\n\
                       Updated the README guide\n\
                       Corrected typo in docs";
        let result = Classifier::new().classify(summary);

        assert_eq!(
            result.categories.iter().copied().collect::<Vec<_>>(),
            vec![
                Category::Feature,
                Category::Bugfix,
                Category::Architecture,
                Category::Documentation
            ]
        );
        assert_eq!(result.features, vec!["Created user profile page"]);
        assert_eq!(result.bug_fixes, vec!["Resolved crash on startup", "Corrected typo in docs"]);
        assert_eq!(result.architecture_changes, vec!["Refactor of the storage layer"]);
        assert_eq!(
            result.documentation_updates,
            vec!["Updated the README guide", "Corrected typo in docs"]
        );
        assert_eq!(result.lines_for(Category::Bugfix).len(), 2);
    }

    #[test]
    fn test_duplicate_physical_lines_are_kept() {
        let result = Classifier::new().classify("Fixed flaky test\nFixed flaky test");
        assert_eq!(result.bug_fixes.len(), 2);
    }

    #[test]
    fn test_migrate_only_counts_for_lines() {
        // "migrate" extracts architecture lines but does not trigger the category itself
        let result = Classifier::new().classify("Migrate database to postgres");
        assert!(!result.categories.contains(&Category::Architecture));
        assert!(result.architecture_changes.is_empty());
    }

    #[test]
    fn test_crlf_lines_are_trimmed() {
        let result = Classifier::new().classify("Fixed login\r\nResolved logout\r\n");
        assert_eq!(result.bug_fixes, vec!["Fixed login", "Resolved logout"]);
    }
}
