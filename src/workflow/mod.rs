//! Session workflow: compliance gate, update pipeline and project health
//!
//! # Error Handling Strategy
//!
//! - **Validation**: never fails; a rejected summary is a [`ValidationResult`](crate::models::ValidationResult)
//!   with `valid == false`, reported through a [`Notifier`].
//! - **Updates**: tracker adapter failures are collected in the [`UpdateReport`]; only failing to
//!   persist the session record aborts an update.
//! - **Status**: a log directory that cannot be listed is an error; a missing context file is
//!   reported as needing a refresh.

pub mod compliance;
pub mod status;
pub mod updater;

pub use compliance::{ComplianceValidator, Notifier};
pub use status::{MaintenanceStatus, WorkflowSettings, WorkflowStatus};
pub use updater::{SessionUpdater, UpdateOutcome, UpdateReport};
