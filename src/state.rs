//! Shared controller state for the HTTP handlers and the reporter

use std::sync::Arc;
use tokio::sync::Mutex;

use sintra_core_presence::{Clock, MonotonicClock, PresenceController, PresenceRegistry};

use crate::config::ControllerConfig;
use crate::error::Result;

/// Application state shared across all handlers.
///
/// The controller sits behind a single mutex; every ingest and every control
/// query holds it for the whole operation.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Mutex<PresenceController>>,
}

impl AppState {
    /// Build state from configuration using the process monotonic clock
    pub fn new(config: &ControllerConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }

    /// Build state with an explicit clock
    pub fn with_clock(config: &ControllerConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let registry = PresenceRegistry::new(config.registry_config())?;
        let policy = config.timing_policy()?;

        tracing::info!(
            capacity = registry.capacity(),
            staleness_threshold_ms = registry.staleness_threshold_ms(),
            tiers = policy.tiers().len(),
            "Presence controller initialized"
        );

        Ok(Self {
            controller: Arc::new(Mutex::new(PresenceController::new(registry, policy, clock))),
        })
    }
}
