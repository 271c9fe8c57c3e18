//! Error types for presence tracking

use thiserror::Error;

/// Errors raised while constructing core components.
///
/// Runtime operations (upsert, prune, evaluate) are total and never fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresenceError {
    #[error("Registry capacity must be at least 1")]
    ZeroCapacity,

    #[error("Policy tier {index} has min_vehicles = 0; tiers start at one vehicle")]
    ZeroTierThreshold { index: usize },

    #[error(
        "Policy tier {index} (min_vehicles = {min_vehicles}) is not above the previous tier ({previous})"
    )]
    UnorderedTiers {
        index: usize,
        min_vehicles: usize,
        previous: usize,
    },
}
