//! Timing Policy: Live vehicle count to green-light duration
//!
//! The policy is an ordered list of tiers. Each tier names the minimum number
//! of vehicles that activates it and the green time it grants. The highest tier
//! whose threshold is met wins; below the first tier the green time is zero.
//!
//! Default tiers:
//!
//! | Vehicles | Green time |
//! |----------|------------|
//! | 0        | 0 s        |
//! | 1 – 4    | 5 s        |
//! | 5 – 14   | 10 s       |
//! | 15+      | 20 s       |
//!
//! # Example
//!
//! ```
//! use sintra_core_presence::policy::{PolicyTier, TimingPolicy};
//!
//! let policy = TimingPolicy::default();
//! assert_eq!(policy.evaluate(0), 0);
//! assert_eq!(policy.evaluate(6), 10);
//!
//! let custom = TimingPolicy::new(vec![
//!     PolicyTier { min_vehicles: 1, green_secs: 8 },
//!     PolicyTier { min_vehicles: 10, green_secs: 30 },
//! ])
//! .unwrap();
//! assert_eq!(custom.evaluate(9), 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PresenceError;

/// One step of the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTier {
    /// Smallest live count that activates this tier
    pub min_vehicles: usize,

    /// Green time granted, in seconds
    pub green_secs: u32,
}

/// Pure mapping from live count to green time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingPolicy {
    tiers: Vec<PolicyTier>,
}

impl TimingPolicy {
    /// Build a policy from tiers ordered by strictly ascending `min_vehicles`
    pub fn new(tiers: Vec<PolicyTier>) -> Result<Self, PresenceError> {
        for (index, tier) in tiers.iter().enumerate() {
            if tier.min_vehicles == 0 {
                return Err(PresenceError::ZeroTierThreshold { index });
            }
            if index > 0 && tier.min_vehicles <= tiers[index - 1].min_vehicles {
                return Err(PresenceError::UnorderedTiers {
                    index,
                    min_vehicles: tier.min_vehicles,
                    previous: tiers[index - 1].min_vehicles,
                });
            }
        }

        Ok(Self { tiers })
    }

    /// The default tier table
    pub fn default_tiers() -> Vec<PolicyTier> {
        vec![
            PolicyTier { min_vehicles: 1, green_secs: 5 },
            PolicyTier { min_vehicles: 5, green_secs: 10 },
            PolicyTier { min_vehicles: 15, green_secs: 20 },
        ]
    }

    /// Green time in seconds for `live_count` vehicles
    pub fn evaluate(&self, live_count: usize) -> u32 {
        self.tiers
            .iter()
            .rev()
            .find(|tier| live_count >= tier.min_vehicles)
            .map_or(0, |tier| tier.green_secs)
    }

    /// Configured tiers, lowest first
    pub fn tiers(&self) -> &[PolicyTier] {
        &self.tiers
    }
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            tiers: Self::default_tiers(),
        }
    }
}
