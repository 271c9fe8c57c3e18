//! Controller boundaries: the two entry points the I/O shell calls
//!
//! - [`IngestBoundary`] accepts a decoded position report and records it.
//! - [`ControlQuery`] produces the next green-light duration.
//!
//! [`PresenceController`] implements both. It owns the registry, the policy and
//! an injected [`Clock`]; it is the only place a timestamp is read.
//!
//! Every control query prunes before it evaluates, so the duration only ever
//! reflects vehicles that are still present.

use std::sync::Arc;

use serde::Serialize;

use crate::clock::Clock;
use crate::policy::TimingPolicy;
use crate::registry::{PresenceRegistry, UpsertOutcome};

/// Acknowledgement returned for every accepted report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportAck {
    /// What the registry did with the report
    pub outcome: UpsertOutcome,

    /// Timestamp (ms) the report was stamped with
    pub received_at: u64,
}

/// Entry point for decoded position reports.
///
/// Callers must have already rejected empty identifiers and non-finite
/// coordinates; the boundary does not validate again.
pub trait IngestBoundary {
    fn submit_report(&mut self, identifier: &str, latitude: f64, longitude: f64) -> ReportAck;
}

/// Entry point for the control loop
pub trait ControlQuery {
    /// Green time in seconds for the vehicles present right now
    fn next_duration(&mut self) -> u32;
}

/// Point-in-time view of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControllerSnapshot {
    pub live_count: usize,
    pub capacity: usize,
    pub green_secs: u32,
}

/// Registry + policy + clock, wired behind the two boundaries
pub struct PresenceController {
    registry: PresenceRegistry,
    policy: TimingPolicy,
    clock: Arc<dyn Clock>,
}

impl PresenceController {
    pub fn new(registry: PresenceRegistry, policy: TimingPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry,
            policy,
            clock,
        }
    }

    /// Records currently held, without pruning
    pub fn live_count(&self) -> usize {
        self.registry.count()
    }

    /// Prune, evaluate and report the resulting state
    pub fn snapshot(&mut self) -> ControllerSnapshot {
        let green_secs = self.next_duration();
        ControllerSnapshot {
            live_count: self.registry.count(),
            capacity: self.registry.capacity(),
            green_secs,
        }
    }

    /// Read-only access to the registry
    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &TimingPolicy {
        &self.policy
    }
}

impl std::fmt::Debug for PresenceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceController")
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .field("now_ms", &self.clock.now_ms())
            .finish()
    }
}

impl IngestBoundary for PresenceController {
    fn submit_report(&mut self, identifier: &str, latitude: f64, longitude: f64) -> ReportAck {
        let now = self.clock.now_ms();
        let outcome = self.registry.upsert(identifier, latitude, longitude, now);

        match outcome {
            UpsertOutcome::Inserted => {
                tracing::debug!(identifier, live = self.registry.count(), "vehicle arrived")
            }
            UpsertOutcome::Updated => tracing::trace!(identifier, "vehicle position refreshed"),
            UpsertOutcome::Dropped => tracing::warn!(
                identifier,
                capacity = self.registry.capacity(),
                "registry full, vehicle not tracked"
            ),
        }

        ReportAck {
            outcome,
            received_at: now,
        }
    }
}

impl ControlQuery for PresenceController {
    fn next_duration(&mut self) -> u32 {
        let now = self.clock.now_ms();
        let evicted = self.registry.prune(now);
        if evicted > 0 {
            tracing::debug!(evicted, live = self.registry.count(), "stale vehicles evicted");
        }
        self.policy.evaluate(self.registry.count())
    }
}
