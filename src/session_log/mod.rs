//! Persistent session log storage
//!
//! Each accepted session update becomes one markdown record under the
//! configured log directory (`session-logs/` by default):
//!
//! - `session_<YYYYMMDD>_<HHMMSS>.md`: one record per session
//! - `archive/<YYYY-MM>/`: records moved out by the retention policy
//!
//! # Error Handling Strategy
//!
//! - **Append**: any write failure is a hard [`LogStoreError`]; losing a record silently is not acceptable.
//! - **Listing**: unreadable or foreign files are logged and skipped.
//! - **Pruning**: continue-on-error; failures are collected in [`PruneReport::errors`].

pub mod format;
pub mod store;

pub use store::{PruneReport, RECENT_WINDOW_DAYS, SessionLogStore, SessionStatistics};
