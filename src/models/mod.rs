//! Data models shared across ContextFlow.
//!
//! - [`SessionUpdate`] - Structured update parsed from a session summary
//! - [`Category`] - Kind of work a summary describes
//! - [`SessionLogRecord`] / [`RecordHandle`] - Persisted form of an update
//! - [`ValidationResult`] - Outcome of a workflow compliance check
//!
//! All models derive serde traits so the CLI can emit them as JSON.

pub mod log_record;
pub mod session;
pub mod validation;

pub use log_record::{RecordHandle, SessionLogRecord};
pub use session::{Category, SessionUpdate};
pub use validation::ValidationResult;
