//! Collect the facts a context snapshot is rendered from

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::{IntegrationKind, ProjectConfig, Workspace};
use crate::error::LogStoreError;
use crate::session_log::SessionLogStore;

/// Session records newer than this feed the recent changes list
pub const RECENT_CHANGES_WINDOW_DAYS: i64 = 7;
/// Session records newer than this contribute active work items
pub const WORK_ITEMS_WINDOW_DAYS: i64 = 14;

const MAX_RECENT_CHANGES: usize = 5;
const RECENT_SUMMARY_CHARS: usize = 100;
const MAX_DOCUMENTATION_FILES: usize = 10;

const IMPORTANT_DIRS: &[&str] = &[
    "src",
    "lib",
    "app",
    "components",
    "pages",
    "api",
    "docs",
    "documentation",
    "tests",
    "test",
    "spec",
    "config",
    "configs",
    "settings",
    "scripts",
    "tools",
    "assets",
    "static",
    "public",
    "resources",
];

const CONFIG_FILES: &[&str] = &[
    "package.json",
    "requirements.txt",
    "Cargo.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "Makefile",
    "Dockerfile",
    "docker-compose.yml",
    ".env",
    ".env.example",
    "tsconfig.json",
    "webpack.config.js",
    "vite.config.js",
    "tailwind.config.js",
    "next.config.js",
];

const DOC_FILES: &[&str] = &[
    "README.md",
    "README.rst",
    "CHANGELOG.md",
    "CONTRIBUTING.md",
    "LICENSE",
    "LICENSE.md",
    "INSTALL.md",
    "USAGE.md",
];

/// What is present at the project root
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FileStructureFacts {
    pub root: PathBuf,
    pub key_directories: Vec<String>,
    pub config_files: Vec<String>,
    pub documentation_files: Vec<String>,
    /// Markdown and README files found anywhere in the usual doc locations
    pub discovered_docs: Vec<String>,
}

impl FileStructureFacts {
    pub fn scan(root: &Path) -> Self {
        let key_directories = present(root, IMPORTANT_DIRS, Path::is_dir);
        let config_files = present(root, CONFIG_FILES, Path::exists);
        let documentation_files = present(root, DOC_FILES, Path::exists);

        Self {
            root: root.to_path_buf(),
            key_directories,
            config_files,
            documentation_files,
            discovered_docs: discover_documentation(root),
        }
    }
}

/// Workflow settings echoed into the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowFacts {
    pub mandatory_updates: bool,
    pub require_work_items: bool,
    pub session_log_dir: PathBuf,
    pub context_dir: PathBuf,
}

/// Everything [`ContextSnapshotBuilder`](super::ContextSnapshotBuilder) needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextFacts {
    pub project: ProjectConfig,
    pub integrations: Vec<IntegrationKind>,
    pub recent_changes: Vec<String>,
    pub work_items: Vec<String>,
    pub structure: FileStructureFacts,
    pub workflow: WorkflowFacts,
}

impl ContextFacts {
    /// Read project metadata, session logs and the file tree for `workspace`
    pub fn gather(workspace: &Workspace, store: &SessionLogStore) -> Result<Self, LogStoreError> {
        let config = &workspace.config;
        let recent_changes = if config.ai_context.include_recent_changes {
            recent_changes(store)?
        } else {
            Vec::new()
        };

        Ok(Self {
            project: config.project.clone(),
            integrations: config.integrations.enabled(),
            recent_changes,
            work_items: active_work_items(store)?,
            structure: FileStructureFacts::scan(&workspace.root),
            workflow: WorkflowFacts {
                mandatory_updates: config.workflow.mandatory_session_updates,
                require_work_items: config.workflow.require_work_item_references,
                session_log_dir: workspace.session_log_dir(),
                context_dir: workspace.context_dir(),
            },
        })
    }
}

/// `Recent: <summary prefix>...` for the newest records of the last week
pub fn recent_changes(store: &SessionLogStore) -> Result<Vec<String>, LogStoreError> {
    let records = store.modified_within(RECENT_CHANGES_WINDOW_DAYS)?;
    Ok(records
        .iter()
        .take(MAX_RECENT_CHANGES)
        .map(|record| {
            let prefix: String = record.summary.chars().take(RECENT_SUMMARY_CHARS).collect();
            format!("Recent: {}...", prefix)
        })
        .collect())
}

/// Distinct work items referenced in the last two weeks, sorted
pub fn active_work_items(store: &SessionLogStore) -> Result<Vec<String>, LogStoreError> {
    let items: BTreeSet<String> = store
        .modified_within(WORK_ITEMS_WINDOW_DAYS)?
        .into_iter()
        .flat_map(|record| record.work_items)
        .collect();
    Ok(items.into_iter().collect())
}

/// Up to ten documentation files relative to `root`
///
/// Searched in order: `README*` and `*.md` at the top level, then
/// `docs/**/*.md` and `documentation/**/*.md`.
pub fn discover_documentation(root: &Path) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |path: &Path| {
        if let Ok(relative) = path.strip_prefix(root) {
            let relative = relative.to_string_lossy().replace('\\', "/");
            if !found.contains(&relative) {
                found.push(relative);
            }
        }
    };

    let mut top_level: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();
    top_level.sort_by_key(|path| !file_name_starts_with(path, "README"));

    for path in top_level.iter().filter(|p| file_name_starts_with(p, "README") || is_markdown(p)) {
        push(path);
    }

    for dir in ["docs", "documentation"] {
        let base = root.join(dir);
        if !base.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&base).sort_by_file_name().into_iter() {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_markdown(entry.path()) => {
                    push(entry.path())
                }
                Ok(_) => {}
                Err(e) => debug!(error = %e, "skipping unreadable documentation entry"),
            }
        }
    }

    found.truncate(MAX_DOCUMENTATION_FILES);
    found
}

/// Entries of `names` under `root` that pass `check`, in list order
fn present(root: &Path, names: &[&str], check: fn(&Path) -> bool) -> Vec<String> {
    names.iter().filter(|name| check(&root.join(name))).map(|name| name.to_string()).collect()
}

fn file_name_starts_with(path: &Path, prefix: &str) -> bool {
    path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.starts_with(prefix))
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}
