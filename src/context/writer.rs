//! Write a snapshot to the workspace context directory

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AiContextConfig;
use crate::error::ContextError;

use super::ContextSnapshot;

pub const USAGE_FILE_NAME: &str = "HOW_TO_USE_CONTEXTFLOW.md";

/// Paths written by [`write_snapshot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFiles {
    pub quick: PathBuf,
    pub full: PathBuf,
    pub usage: PathBuf,
}

/// Write the compact view, the full view and the usage guide into `context_dir`
pub fn write_snapshot(
    context_dir: &Path,
    settings: &AiContextConfig,
    snapshot: &ContextSnapshot,
) -> Result<ContextFiles, ContextError> {
    fs::create_dir_all(context_dir)
        .map_err(|source| ContextError::Write { path: context_dir.to_path_buf(), source })?;

    let files = ContextFiles {
        quick: context_dir.join(&settings.quick_context_file),
        full: context_dir.join(&settings.full_context_file),
        usage: context_dir.join(USAGE_FILE_NAME),
    };

    write_file(&files.quick, &snapshot.compact)?;
    write_file(&files.full, &snapshot.full)?;
    write_file(&files.usage, &usage_guide(settings))?;
    Ok(files)
}

fn write_file(path: &Path, content: &str) -> Result<(), ContextError> {
    fs::write(path, content)
        .map_err(|source| ContextError::Write { path: path.to_path_buf(), source })
}

fn usage_guide(settings: &AiContextConfig) -> String {
    format!(
        "# How to Use ContextFlow\n\n\
         ## For New AI Sessions\n\n\
         ### Quick Context\n\
         ```bash\n\
         cat {quick}\n\
         ```\n\
         Copy the output and paste it into the new AI session.\n\n\
         ### Complete Context\n\
         ```bash\n\
         cat {full}\n\
         ```\n\
         Use for comprehensive project understanding.\n\n\
         ## End of Session\n\n\
         ```bash\n\
         contextflow update \"[your session summary]\"\n\
         ```\n\n\
         **Include in your summary:**\n\
         - Work items referenced (tickets, issues, tasks)\n\
         - Files created or modified\n\
         - Features added or bugs fixed\n\
         - Architecture or design changes\n\n\
         ## Other Commands\n\n\
         ```bash\n\
         # Refresh context\n\
         contextflow context --refresh\n\n\
         # View recent logs\n\
         contextflow logs --recent\n\n\
         # Show project status\n\
         contextflow status\n\
         ```\n",
        quick = settings.quick_context_file,
        full = settings.full_context_file,
    )
}
