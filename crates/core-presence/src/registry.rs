//! Presence Registry: Bounded set of vehicles currently near the intersection
//!
//! Each vehicle that reports its position gets one [`PresenceRecord`], keyed by
//! its identifier. A record is refreshed on every report and evicted once it has
//! gone longer than the staleness threshold without one.
//!
//! # Key Concepts
//!
//! - **Capacity**: Fixed maximum number of tracked vehicles. When full, reports
//!   from unknown identifiers are dropped; known identifiers keep updating.
//! - **Staleness**: A record whose age exceeds the threshold is removed on the
//!   next [`prune`](PresenceRegistry::prune).
//! - **Caller-supplied time**: Every operation takes `now` in milliseconds. The
//!   registry never reads a clock.
//!
//! # Example
//!
//! ```
//! use sintra_core_presence::registry::{PresenceRegistry, UpsertOutcome};
//!
//! let mut registry = PresenceRegistry::default();
//!
//! assert_eq!(registry.upsert("bus-7", -19.92, -43.94, 0), UpsertOutcome::Inserted);
//! assert_eq!(registry.upsert("bus-7", -19.93, -43.95, 500), UpsertOutcome::Updated);
//! assert_eq!(registry.count(), 1);
//!
//! // 30 s is still fresh, anything beyond is stale
//! assert_eq!(registry.prune(30_500), 0);
//! assert_eq!(registry.prune(30_501), 1);
//! assert!(registry.is_empty());
//! ```

use crate::error::PresenceError;

/// Default maximum number of tracked vehicles
pub const DEFAULT_CAPACITY: usize = 20;

/// Default age after which a vehicle is considered gone (30 s)
pub const DEFAULT_STALENESS_THRESHOLD_MS: u64 = 30_000;

/// Configuration for a presence registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum number of records held at once
    pub capacity: usize,

    /// Records strictly older than this (in ms) are removed by `prune`
    pub staleness_threshold_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            staleness_threshold_ms: DEFAULT_STALENESS_THRESHOLD_MS,
        }
    }
}

/// Last known state of one vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceRecord {
    /// Vehicle identifier, unique within the registry
    pub identifier: String,

    /// Last reported latitude (stored as received)
    pub latitude: f64,

    /// Last reported longitude (stored as received)
    pub longitude: f64,

    /// Timestamp (ms) of the most recent report for this identifier
    pub last_seen: u64,
}

impl PresenceRecord {
    /// Age of this record at `now`. Timestamps ahead of `now` count as age zero.
    pub fn age_at(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_seen)
    }
}

/// What an upsert did to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record was created
    Inserted,

    /// An existing record was refreshed in place
    Updated,

    /// Registry full and identifier unknown; nothing changed
    Dropped,
}

/// Bounded, identifier-unique collection of presence records.
///
/// Record order is not stable across prunes; callers must not rely on it.
#[derive(Debug, Clone)]
pub struct PresenceRegistry {
    config: RegistryConfig,
    records: Vec<PresenceRecord>,
}

impl PresenceRegistry {
    /// Create an empty registry with the given configuration
    pub fn new(config: RegistryConfig) -> Result<Self, PresenceError> {
        if config.capacity == 0 {
            return Err(PresenceError::ZeroCapacity);
        }

        Ok(Self {
            records: Vec::with_capacity(config.capacity),
            config,
        })
    }

    /// Record a position report for `identifier` observed at `now`.
    ///
    /// Known identifiers are refreshed regardless of fill level. Unknown
    /// identifiers are added only while below capacity.
    pub fn upsert(
        &mut self,
        identifier: &str,
        latitude: f64,
        longitude: f64,
        now: u64,
    ) -> UpsertOutcome {
        if let Some(record) = self.records.iter_mut().find(|r| r.identifier == identifier) {
            record.latitude = latitude;
            record.longitude = longitude;
            record.last_seen = now;
            return UpsertOutcome::Updated;
        }

        if self.records.len() >= self.config.capacity {
            tracing::trace!(
                identifier,
                capacity = self.config.capacity,
                "registry full, report dropped"
            );
            return UpsertOutcome::Dropped;
        }

        self.records.push(PresenceRecord {
            identifier: identifier.to_string(),
            latitude,
            longitude,
            last_seen: now,
        });
        UpsertOutcome::Inserted
    }

    /// Remove every record older than the staleness threshold at `now`.
    ///
    /// Returns the number of records removed.
    pub fn prune(&mut self, now: u64) -> usize {
        let threshold = self.config.staleness_threshold_ms;
        let before = self.records.len();

        // swap_remove keeps this O(n); index is only advanced past live records
        let mut i = 0;
        while i < self.records.len() {
            if self.records[i].age_at(now) > threshold {
                self.records.swap_remove(i);
            } else {
                i += 1;
            }
        }

        before - self.records.len()
    }

    /// Number of records currently held
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Check if the registry holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if new identifiers would be dropped
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.config.capacity
    }

    /// Maximum number of records
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Age (ms) beyond which records are pruned
    pub fn staleness_threshold_ms(&self) -> u64 {
        self.config.staleness_threshold_ms
    }

    /// Look up the record for an identifier
    pub fn get(&self, identifier: &str) -> Option<&PresenceRecord> {
        self.records.iter().find(|r| r.identifier == identifier)
    }

    /// Iterate over current records in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &PresenceRecord> {
        self.records.iter()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self {
            config: RegistryConfig::default(),
            records: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }
}
