//! Tracker adapter interface and update fan-out
//!
//! Concrete connectors (issue tracker, wiki, code host) live outside this
//! crate. They implement [`TrackerAdapter`] and are handed to the
//! [`AdapterRegistry`], which pushes each accepted session update to every
//! adapter whose integration is enabled in the configuration.
//!
//! # Error Handling Strategy
//!
//! An adapter failure never aborts the fan-out. Each failure is logged and
//! returned as an [`AdapterOutcome`], and no call is retried.

use tracing::{debug, info, warn};

use crate::config::{IntegrationKind, Integrations};
use crate::error::AdapterError;
use crate::models::SessionUpdate;

/// A connector that receives a copy of each accepted session update
pub trait TrackerAdapter {
    fn kind(&self) -> IntegrationKind;

    fn update_from_session(&mut self, update: &SessionUpdate) -> Result<(), AdapterError>;
}

/// Result of pushing one update to one adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterOutcome {
    pub integration: IntegrationKind,
    pub result: Result<(), AdapterError>,
}

impl AdapterOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// The adapters available to a session update
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn TrackerAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, adapter: Box<dyn TrackerAdapter>) {
        debug!(integration = %adapter.kind(), "registered tracker adapter");
        self.adapters.push(adapter);
    }

    pub fn with(mut self, adapter: Box<dyn TrackerAdapter>) -> Self {
        self.register(adapter);
        self
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Call every adapter enabled in `integrations` once, in registration order
    ///
    /// Adapters for disabled integrations are skipped without an outcome. An
    /// enabled integration with no registered adapter is reported as
    /// [`AdapterError::NotConfigured`] after the adapter outcomes.
    pub fn dispatch(
        &mut self,
        update: &SessionUpdate,
        integrations: &Integrations,
    ) -> Vec<AdapterOutcome> {
        let mut outcomes = Vec::new();
        let missing: Vec<IntegrationKind> = integrations
            .enabled()
            .into_iter()
            .filter(|kind| !self.adapters.iter().any(|a| a.kind() == *kind))
            .collect();

        for adapter in &mut self.adapters {
            let integration = adapter.kind();
            if !integrations.is_enabled(integration) {
                debug!(%integration, "integration disabled, skipping adapter");
                continue;
            }

            let result = adapter.update_from_session(update);
            match &result {
                Ok(()) => info!(%integration, "tracker updated"),
                Err(e) => warn!(%integration, error = %e, "tracker update failed"),
            }
            outcomes.push(AdapterOutcome { integration, result });
        }

        for integration in missing {
            debug!(%integration, "integration enabled but no adapter registered");
            let result = Err(AdapterError::NotConfigured {
                integration: integration.display_name().to_string(),
                reason: "no adapter registered".to_string(),
            });
            outcomes.push(AdapterOutcome { integration, result });
        }

        outcomes
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<IntegrationKind> = self.adapters.iter().map(|a| a.kind()).collect();
        f.debug_struct("AdapterRegistry").field("adapters", &kinds).finish()
    }
}
