//! Sintra Core Presence: Pure-logic vehicle presence tracking
//!
//! # Overview
//!
//! This crate holds the decision-making part of the intersection controller:
//!
//! - **Presence Registry**: Bounded set of vehicles currently near the intersection,
//!   keyed by identifier, with time-based eviction
//! - **Timing Policy**: Maps the live vehicle count to a green-light duration
//! - **Ingest / Control boundaries**: The two entry points the I/O shell calls
//! - **Clocks**: Injected millisecond time sources (monotonic and manual)
//!
//! # Key Principles
//!
//! This crate is **pure logic** with zero knowledge of:
//! - Network transports (HTTP, sockets)
//! - Payload formats (JSON)
//! - Scheduling (async runtimes, timers)
//!
//! The registry and the policy never read a clock. Every timestamp is passed in,
//! so the same sequence of calls always produces the same result.
//!
//! # Architecture
//!
//! ```text
//!   transport shell ──submit_report──┐      ┌──next_duration── control loop
//!                                    ▼      ▼
//! ┌─────────────────────────────────────────────────┐
//! │              PresenceController                 │  ← reads Clock
//! └───────────┬───────────────────────┬─────────────┘
//!             │ upsert / prune(now)   │ evaluate(count)
//!             ▼                       ▼
//! ┌───────────────────────┐  ┌───────────────────────┐
//! │   PresenceRegistry    │  │     TimingPolicy      │
//! │ (bounded, unique ids) │  │  (count → seconds)    │
//! └───────────────────────┘  └───────────────────────┘
//! ```
//!
//! # Usage Example
//!
//! ```
//! use sintra_core_presence::{
//!     ControlQuery, IngestBoundary, ManualClock, PresenceController, PresenceRegistry,
//!     TimingPolicy,
//! };
//! use std::sync::Arc;
//!
//! let clock = Arc::new(ManualClock::new(0));
//! let mut controller = PresenceController::new(
//!     PresenceRegistry::default(),
//!     TimingPolicy::default(),
//!     clock.clone(),
//! );
//!
//! for id in ["A", "B", "C", "D", "E", "F"] {
//!     controller.submit_report(id, -19.92, -43.94);
//! }
//!
//! clock.set(1_000);
//! assert_eq!(controller.next_duration(), 10);
//!
//! clock.set(35_000);
//! assert_eq!(controller.next_duration(), 0);
//! ```

pub mod boundary;
pub mod clock;
pub mod error;
pub mod policy;
pub mod registry;

// Re-export main types for convenience
pub use boundary::{
    ControlQuery, ControllerSnapshot, IngestBoundary, PresenceController, ReportAck,
};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::PresenceError;
pub use policy::{PolicyTier, TimingPolicy};
pub use registry::{
    PresenceRecord, PresenceRegistry, RegistryConfig, UpsertOutcome, DEFAULT_CAPACITY,
    DEFAULT_STALENESS_THRESHOLD_MS,
};

/// Prelude module for convenient imports
///
/// # Example
/// ```
/// use sintra_core_presence::prelude::*;
/// ```
pub mod prelude {
    pub use super::boundary::{ControlQuery, IngestBoundary, PresenceController};
    pub use super::clock::{Clock, ManualClock, MonotonicClock};
    pub use super::error::PresenceError;
    pub use super::policy::{PolicyTier, TimingPolicy};
    pub use super::registry::{PresenceRegistry, RegistryConfig, UpsertOutcome};
}
