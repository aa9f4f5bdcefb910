//! Render gathered facts into the compact and full context views

use std::fmt::Write;

use chrono::{DateTime, Local};

use super::gather::ContextFacts;

const COMPACT_RECENT_CHANGES: usize = 3;
const COMPACT_WORK_ITEMS: usize = 5;

/// The two renderings of one context snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSnapshot {
    /// Plain text, bounded, meant for pasting into a new session
    pub compact: String,
    /// Markdown with every gathered fact
    pub full: String,
    pub generated_at: DateTime<Local>,
}

/// Pure transformation from [`ContextFacts`] to a [`ContextSnapshot`]
#[derive(Debug, Clone, Copy)]
pub struct ContextSnapshotBuilder {
    recent_changes_limit: usize,
    work_items_limit: usize,
}

impl Default for ContextSnapshotBuilder {
    fn default() -> Self {
        Self { recent_changes_limit: COMPACT_RECENT_CHANGES, work_items_limit: COMPACT_WORK_ITEMS }
    }
}

impl ContextSnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&self, facts: &ContextFacts) -> ContextSnapshot {
        self.build_at(facts, Local::now())
    }

    /// Build with a fixed generation time; identical inputs give identical output
    pub fn build_at(&self, facts: &ContextFacts, generated_at: DateTime<Local>) -> ContextSnapshot {
        ContextSnapshot {
            compact: self.render_compact(facts),
            full: render_full(facts, &generated_at),
            generated_at,
        }
    }

    fn render_compact(&self, facts: &ContextFacts) -> String {
        let project = &facts.project;
        let mut out = String::new();

        // Writing to a String cannot fail
        let _ = write!(
            out,
            "PROJECT: {}\nDESCRIPTION: {}\nTYPE: {}\nVERSION: {}\n\n",
            project.name, project.description, project.project_type, project.version
        );
        if !project.tags.is_empty() {
            let _ = write!(out, "TAGS: {}\n\n", project.tags.join(", "));
        }

        out.push_str("INTEGRATIONS:\n");
        for integration in &facts.integrations {
            let _ = writeln!(out, "- {}: ENABLED", integration.display_name());
        }
        out.push('\n');

        let structure = &facts.structure;
        list_block(&mut out, "KEY DIRECTORIES:", &structure.key_directories, usize::MAX, true);
        list_block(&mut out, "CONFIGURATION FILES:", &structure.config_files, usize::MAX, true);
        let changes_limit = self.recent_changes_limit;
        list_block(&mut out, "RECENT CHANGES:", &facts.recent_changes, changes_limit, false);
        list_block(&mut out, "ACTIVE WORK ITEMS:", &facts.work_items, self.work_items_limit, false);

        let workflow = &facts.workflow;
        let _ = write!(
            out,
            "WORKFLOW SETTINGS:\n\
             - Mandatory session updates: {}\n\
             - Work item references required: {}\n\
             - Session logs: {}\n\
             - Context directory: {}\n\n",
            yes_no(workflow.mandatory_updates),
            yes_no(workflow.require_work_items),
            workflow.session_log_dir.display(),
            workflow.context_dir.display(),
        );

        out.push_str(
            "CONTEXTFLOW COMMANDS:\n\
             - Update session: contextflow update \"[session summary]\"\n\
             - Refresh context: contextflow context --refresh\n\
             - View logs: contextflow logs --recent\n",
        );
        out
    }
}

/// Heading plus up to `limit` bullet lines; empty lists are skipped unless `always`
fn list_block(out: &mut String, heading: &str, items: &[String], limit: usize, always: bool) {
    if items.is_empty() && !always {
        return;
    }
    out.push_str(heading);
    out.push('\n');
    for item in items.iter().take(limit) {
        let _ = writeln!(out, "- {}", item);
    }
    out.push('\n');
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "YES" } else { "NO" }
}

fn render_full(facts: &ContextFacts, generated_at: &DateTime<Local>) -> String {
    let project = &facts.project;
    let structure = &facts.structure;
    let mut out = String::new();

    let _ = write!(
        out,
        "# {} - AI Context\n\n**Generated:** {}\n**Project Type:** {}\n\n",
        project.name,
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        project.project_type
    );

    let _ = write!(
        out,
        "## Project Overview\n\n**Name:** {}\n**Description:** {}\n**Version:** {}\n",
        project.name, project.description, project.version
    );
    if !project.tags.is_empty() {
        let _ = writeln!(out, "**Tags:** {}", project.tags.join(", "));
    }
    out.push('\n');

    out.push_str("## Integrations\n\n");
    if facts.integrations.is_empty() {
        out.push_str("- No integrations currently enabled\n");
    }
    for integration in &facts.integrations {
        let _ = writeln!(out, "- **{}:** Enabled", integration.display_name());
    }
    out.push('\n');

    let _ = write!(
        out,
        "## Project Structure\n\n**Root Directory:** {}\n\n",
        structure.root.display()
    );
    bold_list(&mut out, "**Key Directories:**", &structure.key_directories);
    bold_list(&mut out, "**Configuration Files:**", &structure.config_files);
    bold_list(&mut out, "**Documentation Files:**", &structure.documentation_files);

    section_list(&mut out, "## Documentation", &structure.discovered_docs);
    section_list(&mut out, "## Recent Changes", &facts.recent_changes);
    section_list(&mut out, "## Active Work Items", &facts.work_items);

    let workflow = &facts.workflow;
    let _ = write!(
        out,
        "## Workflow Configuration\n\n\
         - **Mandatory session updates:** {}\n\
         - **Work item references required:** {}\n\
         - **Session logs directory:** {}\n\
         - **Context directory:** {}\n\n",
        if workflow.mandatory_updates { "Enabled" } else { "Disabled" },
        if workflow.require_work_items { "Yes" } else { "No" },
        workflow.session_log_dir.display(),
        workflow.context_dir.display(),
    );

    out.push_str(
        "## ContextFlow Commands\n\n\
         ```bash\n\
         # Update session documentation\n\
         contextflow update \"[detailed session summary]\"\n\n\
         # Refresh AI context\n\
         contextflow context --refresh\n\n\
         # View recent session logs\n\
         contextflow logs --recent\n\n\
         # Show project status\n\
         contextflow status\n\
         ```\n\n\
         ---\n\n\
         *This context file is generated by ContextFlow. \
         Use `contextflow context --refresh` to update it with the latest project information.*\n",
    );
    out
}

fn bold_list(out: &mut String, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(label);
    out.push('\n');
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
    out.push('\n');
}

fn section_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = write!(out, "{}\n\n", heading);
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
    out.push('\n');
}
