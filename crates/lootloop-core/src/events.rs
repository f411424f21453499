use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::track::{Cadence, RewardKind};

/// Per-track view-model pushed to the presentation layer once per tick.
/// Push-only, latest-value-wins; a missed intermediate tick is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub cadence: Cadence,
    pub claimable: bool,
    /// Seconds until the cooldown elapses. Zero when claimable.
    pub remaining_secs: u64,
    /// Cooldown progress in `[0, 1]`.
    pub progress: f64,
    pub active_slot: usize,
    /// One flag per reward slot: `true` once the cycle has reached it.
    pub slots_unlocked: Vec<bool>,
    /// Set while a state write is still awaiting a successful retry.
    pub storage_lagging: bool,
    pub at: DateTime<Utc>,
}

/// Every state-changing action produces an Event.
/// The CLI prints them as JSON; embedders subscribe to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    RewardClaimed {
        cadence: Cadence,
        slot: usize,
        kind: RewardKind,
        amount: u32,
        at: DateTime<Utc>,
    },
    TrackReset {
        cadence: Cadence,
        at: DateTime<Utc>,
    },
}
