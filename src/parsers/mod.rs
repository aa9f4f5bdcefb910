//! Session summary parsing
//!
//! # Error Handling Strategy
//!
//! Nothing in this module fails. Summaries are free text typed at the end of
//! a session, so malformed input is the normal case:
//!
//! - **No matches**: absent work items, files or keywords yield empty collections.
//! - **Arbitrary text**: any UTF-8 input is accepted; patterns are ASCII-oriented
//!   and simply skip what they do not recognize.
//! - **Purity**: every function is a deterministic function of its input, apart
//!   from [`SessionParser::parse`] stamping the current time.
//!
//! Rejecting a summary is a policy decision and lives in
//! [`crate::workflow::compliance`], not here.

pub mod classifier;
pub mod patterns;
pub mod session;

pub use classifier::{Classification, Classifier};
pub use patterns::PatternExtractor;
pub use session::SessionParser;
