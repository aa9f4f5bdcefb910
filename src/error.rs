//! Error types for the persistence, configuration and integration layers.
//!
//! Parsing and validation never fail, so they have no error type here.

use std::path::PathBuf;

/// Failures reading or writing the session log directory.
#[derive(Debug, thiserror::Error)]
pub enum LogStoreError {
    #[error("failed to create log directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write session record {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures loading or saving `contextflow.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown integration: {0} (expected one of confluence, jira, github, notion, slack)")]
    UnknownIntegration(String),
}

/// Outcome of a tracker adapter that did not accept an update.
///
/// Kept distinct so callers can tell a missing setup apart from a retryable
/// outage and from the remote service refusing the data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("{integration} is not configured: {reason}")]
    NotConfigured { integration: String, reason: String },

    #[error("{integration} is temporarily unavailable: {reason}")]
    Transient { integration: String, reason: String },

    #[error("{integration} rejected the update: {reason}")]
    Rejected { integration: String, reason: String },
}

/// Failures creating a project from a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown template: {0} (run `contextflow templates` to list them)")]
    Unknown(String),

    #[error("failed to create project directories under {path}")]
    Directories {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures regenerating the AI context files.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("failed to write context file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    LogStore(#[from] LogStoreError),
}
