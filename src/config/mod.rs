//! Project configuration (`contextflow.toml`)
//!
//! The configuration is loaded once and handed to each component explicitly;
//! nothing reads it from global state. Every field has a default, so an empty
//! or partial file is valid.
//!
//! ```toml
//! [project]
//! name = "Checkout"
//! type = "software-development"
//!
//! [integrations.github]
//! enabled = true
//! repository = "acme/checkout"
//!
//! [workflow]
//! require_work_item_references = false
//! session_log_retention_days = 60
//! ```

pub mod integrations;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use integrations::{IntegrationKind, IntegrationSettings, Integrations};

use crate::error::ConfigError;

/// Config file names searched for, in order of preference
pub const CONFIG_FILE_NAMES: [&str; 2] = ["contextflow.toml", ".contextflow.toml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub version: String,
    pub tags: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "My Project".to_string(),
            description: "Project description".to_string(),
            project_type: "software-development".to_string(),
            version: "1.0.0".to_string(),
            tags: Vec::new(),
        }
    }
}

/// Where and how AI context snapshots are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiContextConfig {
    pub quick_context_file: String,
    pub full_context_file: String,
    pub context_directory: String,
    pub auto_refresh: bool,
    pub max_context_length: usize,
    pub include_recent_changes: bool,
}

impl Default for AiContextConfig {
    fn default() -> Self {
        Self {
            quick_context_file: "QUICK_CONTEXT.txt".to_string(),
            full_context_file: "PROJECT_CONTEXT.md".to_string(),
            context_directory: "ai-context".to_string(),
            auto_refresh: true,
            max_context_length: 10_000,
            include_recent_changes: true,
        }
    }
}

/// Workflow rules applied to session updates and their logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowPolicy {
    pub mandatory_session_updates: bool,
    pub require_work_item_references: bool,
    pub session_log_retention_days: u32,
    pub team_notifications: bool,
    pub auto_archive_logs: bool,
    pub session_log_directory: String,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            mandatory_session_updates: true,
            require_work_item_references: true,
            session_log_retention_days: 90,
            team_notifications: false,
            auto_archive_logs: true,
            session_log_directory: "session-logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub integrations: Integrations,
    pub ai_context: AiContextConfig,
    pub workflow: WorkflowPolicy,
}

impl Config {
    /// Parse a TOML document; `origin` is only used in error messages
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)
            .map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })?;
        config.integrations.validate_names()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// A project directory together with its loaded configuration
///
/// All relative paths in the config resolve against `root`.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub config: Config,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self { root: root.into(), config_path: None, config }
    }

    /// Find a config file in `start` or any of its parents
    ///
    /// Falls back to default configuration rooted at `start` when none exists.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        match find_config_file(start) {
            Some(path) => Self::load(&path),
            None => {
                debug!(start = %start.display(), "no config file found, using defaults");
                Ok(Self::new(start, Config::default()))
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Config::from_toml_str(&content, path)?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));

        debug!(config = %path.display(), "loaded configuration");
        Ok(Self { root, config_path: Some(path.to_path_buf()), config })
    }

    /// Write the config back to where it was loaded from, or `<root>/contextflow.toml`
    pub fn save(&mut self) -> Result<PathBuf, ConfigError> {
        let path = self.config_path.clone().unwrap_or_else(|| self.root.join(CONFIG_FILE_NAMES[0]));
        let content = self.config.to_toml_string()?;
        fs::write(&path, content)
            .map_err(|source| ConfigError::Write { path: path.clone(), source })?;
        self.config_path = Some(path.clone());
        Ok(path)
    }

    pub fn session_log_dir(&self) -> PathBuf {
        self.root.join(&self.config.workflow.session_log_directory)
    }

    pub fn context_dir(&self) -> PathBuf {
        self.root.join(&self.config.ai_context.context_directory)
    }

    pub fn quick_context_path(&self) -> PathBuf {
        self.context_dir().join(&self.config.ai_context.quick_context_file)
    }

    pub fn full_context_path(&self) -> PathBuf {
        self.context_dir().join(&self.config.ai_context.full_context_file)
    }

    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(self.context_dir())?;
        fs::create_dir_all(self.session_log_dir())
    }
}

fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|candidate| candidate.is_file())
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.project.name, "My Project");
        assert_eq!(config.ai_context.quick_context_file, "QUICK_CONTEXT.txt");
        assert!(config.workflow.mandatory_session_updates);
        assert_eq!(config.workflow.session_log_retention_days, 90);
        assert!(config.integrations.enabled().is_empty());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let content = r#"
[project]
name = "Test Project"
description = "Test Description"
type = "research-project"

[integrations.github]
enabled = true
repository = "test/repo"

[workflow]
require_work_item_references = false
"#;
        let config = Config::from_toml_str(content, Path::new("contextflow.toml")).unwrap();
        assert_eq!(config.project.name, "Test Project");
        assert_eq!(config.project.project_type, "research-project");
        assert_eq!(config.project.version, "1.0.0");
        assert!(!config.workflow.require_work_item_references);
        assert!(config.workflow.auto_archive_logs);
        assert!(config.integrations.is_enabled(IntegrationKind::Github));
        assert!(!config.integrations.is_enabled(IntegrationKind::Jira));
    }

    #[test]
    fn test_unknown_integration_rejected() {
        let content = "[integrations.myspace]\nenabled = true\n";
        let err = Config::from_toml_str(content, Path::new("contextflow.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownIntegration(ref name) if name == "myspace"));
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let err = Config::from_toml_str("[project\n", Path::new("/tmp/broken.toml")).unwrap_err();
        assert!(err.to_string().contains("/tmp/broken.toml"));
    }

    #[test]
    fn test_discover_walks_up_to_parent() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("contextflow.toml"), "[project]\nname = \"Parent\"\n").unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let workspace = Workspace::discover(&nested).unwrap();
        assert_eq!(workspace.config.project.name, "Parent");
        assert_eq!(workspace.root, temp.path());
        assert_eq!(workspace.session_log_dir(), temp.path().join("session-logs"));
    }

    #[test]
    fn test_discover_without_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::discover(temp.path()).unwrap();
        assert!(workspace.config_path.is_none());
        assert_eq!(workspace.config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.project.name = "Saved".to_string();
        config.project.tags = vec!["a".to_string(), "b".to_string()];
        config.workflow.session_log_retention_days = 30;

        let mut workspace = Workspace::new(temp.path(), config.clone());
        let path = workspace.save().unwrap();
        assert_eq!(path, temp.path().join("contextflow.toml"));

        let loaded = Workspace::load(&path).unwrap();
        assert_eq!(loaded.config, config);
    }

    #[test]
    fn test_ensure_directories() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.ai_context.context_directory = "test-context".to_string();
        config.workflow.session_log_directory = "test-logs".to_string();

        let workspace = Workspace::new(temp.path(), config);
        workspace.ensure_directories().unwrap();
        assert!(temp.path().join("test-context").is_dir());
        assert!(temp.path().join("test-logs").is_dir());
    }
}
