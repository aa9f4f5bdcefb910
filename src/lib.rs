//! ContextFlow - session documentation continuity for AI-assisted work
//!
//! Free-text end-of-session summaries are turned into structured updates,
//! checked against the project's workflow rules, stored as markdown session
//! logs and folded into context snapshots for the next session:
//!
//! - Extracting work items and file references from a summary
//! - Classifying summaries into features, bug fixes, architecture and documentation work
//! - Validating summaries against the configured [`WorkflowPolicy`]
//! - Appending, listing and pruning session logs
//! - Building compact and full AI context files
//!
//! # Example
//!
//! ```no_run
//! use contextflow::{SessionLogStore, SessionParser, Workspace};
//! use std::path::Path;
//!
//! let workspace = Workspace::discover(Path::new("."))?;
//! let project_type = &workspace.config.project.project_type;
//! let update = SessionParser::new().parse("Fixed PROJ-12 in src/lib.rs", project_type);
//! let record = SessionLogStore::for_workspace(&workspace).append(&update)?;
//! println!("Logged {}", record.path.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod context;
pub mod error;
pub mod integrations;
pub mod models;
pub mod parsers;
pub mod session_log;
pub mod telemetry;
pub mod templates;
pub mod utils;
pub mod workflow;

// Re-export commonly used types
pub use config::{Config, Workspace, WorkflowPolicy};
pub use context::{ContextSnapshot, ContextSnapshotBuilder};
pub use models::{Category, SessionLogRecord, SessionUpdate, ValidationResult};
pub use parsers::{Classifier, PatternExtractor, SessionParser};
pub use session_log::SessionLogStore;
pub use workflow::{ComplianceValidator, Notifier, SessionUpdater};
