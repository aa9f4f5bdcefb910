//! Preset project configurations for `contextflow init`

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::config::{Config, IntegrationKind, IntegrationSettings, Workspace};
use crate::error::TemplateError;

pub const DEFAULT_TEMPLATE: &str = "software-development";

type IntegrationPreset = (IntegrationKind, &'static [(&'static str, &'static str)]);

/// A named starting configuration
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub project_type: &'static str,
    pub tags: &'static [&'static str],
    #[serde(skip)]
    integrations: &'static [IntegrationPreset],
    pub mandatory_updates: bool,
    pub require_work_items: bool,
    pub retention_days: u32,
    pub team_notifications: bool,
    pub quick_context_file: &'static str,
    pub full_context_file: &'static str,
    pub auto_refresh: bool,
}

pub const TEMPLATES: &[ProjectTemplate] = &[
    ProjectTemplate {
        name: "software-development",
        description: "Software development with JIRA, GitHub, and technical documentation",
        project_type: "software-development",
        tags: &["development", "software", "engineering"],
        integrations: &[
            (
                IntegrationKind::Jira,
                &[("base_url", "https://your-company.atlassian.net"), ("project_key", "PROJ")],
            ),
            (IntegrationKind::Github, &[("repository", "your-org/your-repo")]),
            (
                IntegrationKind::Confluence,
                &[("base_url", "https://your-company.atlassian.net"), ("space_key", "PROJ")],
            ),
        ],
        mandatory_updates: true,
        require_work_items: true,
        retention_days: 90,
        team_notifications: false,
        quick_context_file: "DEV_QUICK_CONTEXT.txt",
        full_context_file: "DEV_PROJECT_CONTEXT.md",
        auto_refresh: true,
    },
    ProjectTemplate {
        name: "side-project",
        description: "Personal side projects with simple tracking and GitHub integration",
        project_type: "side-project",
        tags: &["side-project", "personal", "hobby"],
        integrations: &[(IntegrationKind::Github, &[("repository", "your-username/your-repo")])],
        mandatory_updates: true,
        require_work_items: false,
        retention_days: 60,
        team_notifications: false,
        quick_context_file: "SIDE_PROJECT_CONTEXT.txt",
        full_context_file: "SIDE_PROJECT_FULL.md",
        auto_refresh: true,
    },
    ProjectTemplate {
        name: "research-project",
        description: "Research projects with literature tracking and experiment logs",
        project_type: "research-project",
        tags: &["research", "academic", "science"],
        integrations: &[
            (IntegrationKind::Notion, &[]),
            (IntegrationKind::Github, &[("repository", "your-org/research-repo")]),
        ],
        mandatory_updates: true,
        require_work_items: false,
        retention_days: 365,
        team_notifications: false,
        quick_context_file: "RESEARCH_QUICK_CONTEXT.txt",
        full_context_file: "RESEARCH_PROJECT_CONTEXT.md",
        auto_refresh: true,
    },
    ProjectTemplate {
        name: "consulting",
        description: "Client consulting with deliverable tracking and meeting management",
        project_type: "consulting-project",
        tags: &["consulting", "client", "deliverables"],
        integrations: &[
            (
                IntegrationKind::Confluence,
                &[("base_url", "https://your-company.atlassian.net"), ("space_key", "CLIENT")],
            ),
            (IntegrationKind::Slack, &[("channel", "#client-project")]),
        ],
        mandatory_updates: true,
        require_work_items: false,
        retention_days: 180,
        team_notifications: true,
        quick_context_file: "CLIENT_QUICK_CONTEXT.txt",
        full_context_file: "CLIENT_PROJECT_CONTEXT.md",
        auto_refresh: true,
    },
    ProjectTemplate {
        name: "content-creation",
        description: "Content creation with editorial calendars and progress tracking",
        project_type: "content-creation",
        tags: &["content", "marketing", "creative"],
        integrations: &[
            (IntegrationKind::Notion, &[]),
            (IntegrationKind::Slack, &[("channel", "#content-team")]),
        ],
        mandatory_updates: true,
        require_work_items: false,
        retention_days: 120,
        team_notifications: false,
        quick_context_file: "CONTENT_QUICK_CONTEXT.txt",
        full_context_file: "CONTENT_PROJECT_CONTEXT.md",
        auto_refresh: true,
    },
    ProjectTemplate {
        name: "academic-research",
        description: "Academic research with paper writing and citation management",
        project_type: "academic-research",
        tags: &["academic", "research", "publication"],
        integrations: &[
            (IntegrationKind::Github, &[("repository", "research-group/paper-repo")]),
            (IntegrationKind::Notion, &[]),
        ],
        mandatory_updates: true,
        require_work_items: false,
        retention_days: 730,
        team_notifications: false,
        quick_context_file: "ACADEMIC_QUICK_CONTEXT.txt",
        full_context_file: "ACADEMIC_PROJECT_CONTEXT.md",
        auto_refresh: true,
    },
    ProjectTemplate {
        name: "minimal",
        description: "Minimal setup with basic session tracking only",
        project_type: "minimal",
        tags: &["minimal", "basic"],
        integrations: &[],
        mandatory_updates: false,
        require_work_items: false,
        retention_days: 30,
        team_notifications: false,
        quick_context_file: "QUICK_CONTEXT.txt",
        full_context_file: "PROJECT_CONTEXT.md",
        auto_refresh: false,
    },
];

impl ProjectTemplate {
    pub fn find(name: &str) -> Result<&'static ProjectTemplate, TemplateError> {
        TEMPLATES
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| TemplateError::Unknown(name.to_string()))
    }

    /// Integrations this template turns on, in template order
    pub fn integrations(&self) -> Vec<IntegrationKind> {
        self.integrations.iter().map(|(kind, _)| *kind).collect()
    }

    /// Default configuration with this template applied
    ///
    /// Integrations not named by the template are written out disabled.
    pub fn config(&self, name: &str, description: &str) -> Config {
        let mut config = Config::default();

        config.project.name = name.to_string();
        config.project.description = description.to_string();
        config.project.project_type = self.project_type.to_string();
        config.project.tags = self.tags.iter().map(|t| t.to_string()).collect();

        for kind in IntegrationKind::ALL {
            config.integrations.set(kind, IntegrationSettings::default());
        }
        for (kind, settings) in self.integrations {
            let preset = settings
                .iter()
                .fold(IntegrationSettings::enabled(), |acc, (key, value)| acc.with(key, *value));
            config.integrations.set(*kind, preset);
        }

        config.workflow.mandatory_session_updates = self.mandatory_updates;
        config.workflow.require_work_item_references = self.require_work_items;
        config.workflow.session_log_retention_days = self.retention_days;
        config.workflow.team_notifications = self.team_notifications;

        config.ai_context.quick_context_file = self.quick_context_file.to_string();
        config.ai_context.full_context_file = self.full_context_file.to_string();
        config.ai_context.auto_refresh = self.auto_refresh;

        config
    }
}

/// Write `contextflow.toml` for `template` into `root` and create the project directories
pub fn create_project(
    root: &Path,
    template: &str,
    name: &str,
    description: &str,
) -> Result<Workspace, TemplateError> {
    let template = ProjectTemplate::find(template)?;
    let mut workspace = Workspace::new(root, template.config(name, description));

    let path = workspace.save()?;
    workspace
        .ensure_directories()
        .map_err(|source| TemplateError::Directories { path: root.to_path_buf(), source })?;

    info!(template = template.name, config = %path.display(), "project initialized");
    Ok(workspace)
}
