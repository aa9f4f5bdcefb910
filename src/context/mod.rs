//! AI context snapshots
//!
//! A snapshot folds project metadata, enabled integrations, recent session
//! records and the project file layout into two views:
//!
//! - **compact**: plain text for pasting into a fresh AI session, with recent
//!   changes capped at 3 and work items at 5
//! - **full**: markdown with everything that was gathered
//!
//! [`regenerate`] runs the whole pipeline and writes both views plus a short
//! usage guide into the configured context directory.
//!
//! # Error Handling Strategy
//!
//! Gathering tolerates unreadable records and documentation entries (logged and
//! skipped). Failing to list the log directory or to write a context file is a
//! [`ContextError`].

pub mod builder;
pub mod gather;
pub mod writer;

use tracing::{info, warn};

pub use builder::{ContextSnapshot, ContextSnapshotBuilder};
pub use gather::{ContextFacts, FileStructureFacts, WorkflowFacts};
pub use writer::{ContextFiles, USAGE_FILE_NAME, write_snapshot};

use crate::config::Workspace;
use crate::error::ContextError;
use crate::session_log::SessionLogStore;

/// A freshly written snapshot and where it went
#[derive(Debug, Clone)]
pub struct ContextRefresh {
    pub snapshot: ContextSnapshot,
    pub files: ContextFiles,
}

/// Gather, build and write the context files for `workspace`
pub fn regenerate(
    workspace: &Workspace,
    store: &SessionLogStore,
) -> Result<ContextRefresh, ContextError> {
    let facts = ContextFacts::gather(workspace, store)?;
    let snapshot = ContextSnapshotBuilder::new().build(&facts);

    let max_len = workspace.config.ai_context.max_context_length;
    let compact_len = snapshot.compact.chars().count();
    if compact_len > max_len {
        warn!(length = compact_len, max = max_len, "quick context exceeds max_context_length");
    }

    let files = write_snapshot(&workspace.context_dir(), &workspace.config.ai_context, &snapshot)?;
    info!(
        quick = %files.quick.display(),
        full = %files.full.display(),
        "context files regenerated"
    );
    Ok(ContextRefresh { snapshot, files })
}
