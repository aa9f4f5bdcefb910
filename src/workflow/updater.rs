//! End-of-session update pipeline

use tracing::{info, warn};

use super::compliance::{ComplianceValidator, Notifier};
use crate::config::Workspace;
use crate::context::{self, ContextFiles};
use crate::error::LogStoreError;
use crate::integrations::{AdapterOutcome, AdapterRegistry};
use crate::models::{RecordHandle, SessionUpdate};
use crate::parsers::SessionParser;
use crate::session_log::SessionLogStore;

/// What a successful update produced
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub update: SessionUpdate,
    pub record: RecordHandle,
    pub adapters: Vec<AdapterOutcome>,
    /// `None` when auto refresh is off or regeneration failed
    pub context: Option<ContextFiles>,
}

impl UpdateReport {
    pub fn adapter_successes(&self) -> usize {
        self.adapters.iter().filter(|o| o.is_success()).count()
    }

    pub fn adapter_failures(&self) -> impl Iterator<Item = &AdapterOutcome> {
        self.adapters.iter().filter(|o| !o.is_success())
    }
}

#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// The summary failed the compliance gate; nothing was written
    Rejected,
    Recorded(Box<UpdateReport>),
}

/// Runs a summary through validation, parsing, tracker fan-out, logging and
/// context regeneration
pub struct SessionUpdater<'a> {
    workspace: &'a Workspace,
    parser: SessionParser,
    validator: ComplianceValidator,
    store: SessionLogStore,
    adapters: AdapterRegistry,
}

impl<'a> SessionUpdater<'a> {
    pub fn new(workspace: &'a Workspace, adapters: AdapterRegistry) -> Self {
        Self {
            workspace,
            parser: SessionParser::new(),
            validator: ComplianceValidator::new(workspace.config.workflow.clone()),
            store: SessionLogStore::for_workspace(workspace),
            adapters,
        }
    }

    pub fn store(&self) -> &SessionLogStore {
        &self.store
    }

    /// Record one session
    ///
    /// Adapter failures are reported in the outcome and never abort the
    /// update. Failing to persist the record is an error.
    pub fn update(
        &mut self,
        summary: &str,
        notifier: &mut dyn Notifier,
    ) -> Result<UpdateOutcome, LogStoreError> {
        if !self.validator.enforce(summary, notifier) {
            info!("session summary rejected by compliance rules");
            return Ok(UpdateOutcome::Rejected);
        }

        let config = &self.workspace.config;
        let update = self.parser.parse(summary, &config.project.project_type);
        let adapters = self.adapters.dispatch(&update, &config.integrations);
        let record = self.store.append(&update)?;

        let context = if config.ai_context.auto_refresh {
            match context::regenerate(self.workspace, &self.store) {
                Ok(refresh) => Some(refresh.files),
                Err(e) => {
                    warn!(error = ?e, "session recorded but context regeneration failed");
                    None
                }
            }
        } else {
            None
        };

        let report = UpdateReport { update, record, adapters, context };
        info!(
            record = %report.record.id,
            adapters_ok = report.adapter_successes(),
            adapters_total = report.adapters.len(),
            "session documentation updated"
        );
        Ok(UpdateOutcome::Recorded(Box::new(report)))
    }
}
