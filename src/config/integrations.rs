use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// External services a session update can be pushed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    Confluence,
    Jira,
    Github,
    Notion,
    Slack,
}

impl IntegrationKind {
    pub const ALL: [IntegrationKind; 5] = [
        IntegrationKind::Confluence,
        IntegrationKind::Jira,
        IntegrationKind::Github,
        IntegrationKind::Notion,
        IntegrationKind::Slack,
    ];

    /// Key used in `[integrations.<key>]`
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationKind::Confluence => "confluence",
            IntegrationKind::Jira => "jira",
            IntegrationKind::Github => "github",
            IntegrationKind::Notion => "notion",
            IntegrationKind::Slack => "slack",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IntegrationKind::Confluence => "Confluence",
            IntegrationKind::Jira => "Jira",
            IntegrationKind::Github => "GitHub",
            IntegrationKind::Notion => "Notion",
            IntegrationKind::Slack => "Slack",
        }
    }
}

impl fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegrationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntegrationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownIntegration(s.to_string()))
    }
}

/// Settings for one integration: an `enabled` flag plus service-specific keys
///
/// Credentials are never read from here by ContextFlow itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntegrationSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub settings: BTreeMap<String, toml::Value>,
}

impl IntegrationSettings {
    pub fn enabled() -> Self {
        Self { enabled: true, settings: BTreeMap::new() }
    }

    pub fn with(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(toml::Value::as_str)
    }
}

/// Explicit integration name to settings mapping
///
/// A known integration without an entry is "not configured" and counts as disabled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Integrations(BTreeMap<String, IntegrationSettings>);

impl Integrations {
    pub fn get(&self, kind: IntegrationKind) -> Option<&IntegrationSettings> {
        self.0.get(kind.as_str())
    }

    /// Look up by user-supplied name; unknown names are an error, not a default
    pub fn get_by_name(&self, name: &str) -> Result<Option<&IntegrationSettings>, ConfigError> {
        let kind: IntegrationKind = name.parse()?;
        Ok(self.get(kind))
    }

    pub fn set(&mut self, kind: IntegrationKind, settings: IntegrationSettings) {
        self.0.insert(kind.as_str().to_string(), settings);
    }

    pub fn is_enabled(&self, kind: IntegrationKind) -> bool {
        self.get(kind).is_some_and(|settings| settings.enabled)
    }

    /// Enabled integrations in canonical order
    pub fn enabled(&self) -> Vec<IntegrationKind> {
        IntegrationKind::ALL.into_iter().filter(|kind| self.is_enabled(*kind)).collect()
    }

    pub(crate) fn validate_names(&self) -> Result<(), ConfigError> {
        for name in self.0.keys() {
            name.parse::<IntegrationKind>()?;
        }
        Ok(())
    }
}
