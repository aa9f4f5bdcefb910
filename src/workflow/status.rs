//! Workflow health: configuration summary, log statistics, maintenance state

use std::fs;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::Workspace;
use crate::error::LogStoreError;
use crate::session_log::{SessionLogStore, SessionStatistics};

/// Quick context older than this many days should be regenerated
const CONTEXT_STALE_DAYS: f64 = 7.0;
const LOW_FREQUENCY_PER_WEEK: f64 = 2.0;
const HIGH_FREQUENCY_PER_WEEK: f64 = 10.0;

const LOW_FREQUENCY: &str =
    "Consider more frequent session updates (2-3 per week) for better project continuity.";
const HIGH_FREQUENCY: &str =
    "Very high session frequency detected. Consider consolidating smaller updates.";
const MISSING_CONTEXT: &str = "Generate AI context (no quick context file found).";
const ENABLE_MANDATORY: &str = "Enable mandatory session updates for better project tracking.";
const REQUIRE_WORK_ITEMS: &str =
    "Consider requiring work item references to improve traceability.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowSettings {
    pub mandatory_updates: bool,
    pub require_work_items: bool,
    pub auto_refresh: bool,
    pub retention_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceStatus {
    pub old_logs_count: usize,
    pub log_cleanup_needed: bool,
    /// Age of the quick context file, one decimal; `None` when it does not exist
    pub context_age_days: Option<f64>,
    pub context_refresh_needed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStatus {
    pub configuration: WorkflowSettings,
    pub statistics: SessionStatistics,
    pub maintenance: MaintenanceStatus,
}

impl WorkflowStatus {
    pub fn collect(workspace: &Workspace, store: &SessionLogStore) -> Result<Self, LogStoreError> {
        Self::collect_at(workspace, store, Local::now())
    }

    pub fn collect_at(
        workspace: &Workspace,
        store: &SessionLogStore,
        now: DateTime<Local>,
    ) -> Result<Self, LogStoreError> {
        let config = &workspace.config;
        let old_logs_count = store.expired_count(config.workflow.session_log_retention_days)?;

        let context_age_days = fs::metadata(workspace.quick_context_path())
            .and_then(|m| m.modified())
            .ok()
            .map(|modified| {
                let age = now - DateTime::<Local>::from(modified);
                let days = age.num_seconds() as f64 / 86_400.0;
                (days * 10.0).round() / 10.0
            });

        Ok(Self {
            configuration: WorkflowSettings {
                mandatory_updates: config.workflow.mandatory_session_updates,
                require_work_items: config.workflow.require_work_item_references,
                auto_refresh: config.ai_context.auto_refresh,
                retention_days: config.workflow.session_log_retention_days,
            },
            statistics: store.statistics()?,
            maintenance: MaintenanceStatus {
                old_logs_count,
                log_cleanup_needed: old_logs_count > 0,
                context_age_days,
                context_refresh_needed: context_age_days.is_none_or(|age| age > CONTEXT_STALE_DAYS),
            },
        })
    }

    /// Suggestions for improving how the project uses session updates
    pub fn recommendations(&self) -> Vec<String> {
        let mut recommendations = Vec::new();
        let per_week = self.statistics.avg_sessions_per_week;

        if per_week < LOW_FREQUENCY_PER_WEEK {
            recommendations.push(LOW_FREQUENCY.to_string());
        } else if per_week > HIGH_FREQUENCY_PER_WEEK {
            recommendations.push(HIGH_FREQUENCY.to_string());
        }

        if self.maintenance.log_cleanup_needed {
            recommendations.push(format!(
                "Clean up {} old session logs to maintain performance.",
                self.maintenance.old_logs_count
            ));
        }

        if self.maintenance.context_refresh_needed {
            match self.maintenance.context_age_days {
                Some(age) => recommendations
                    .push(format!("Refresh AI context (last updated {} days ago).", age)),
                None => recommendations.push(MISSING_CONTEXT.to_string()),
            }
        }

        if !self.configuration.mandatory_updates {
            recommendations.push(ENABLE_MANDATORY.to_string());
        }
        if !self.configuration.require_work_items {
            recommendations.push(REQUIRE_WORK_ITEMS.to_string());
        }

        recommendations
    }
}
