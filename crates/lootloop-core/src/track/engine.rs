//! Reward track implementation.
//!
//! A reward track is a wall-clock-based state machine. It holds no timer of
//! its own - the caller passes `now` into every operation, so correctness
//! depends solely on the wall-clock delta since the last claim, never on how
//! often (or whether) the process was running in between.
//!
//! ## Eligibility windows
//!
//! ```text
//! claim ──cooldown──▶ claimable ──deadline──▶ forfeited (slot reset to 0)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut track = RewardTrack::new(Cadence::Daily, config);
//! let eval = track.evaluate(Utc::now());
//! if eval.claimable {
//!     let (slot, credit) = track.claim(Utc::now())?;
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reward::{Cadence, CadenceConfig, CreditInstruction};
use crate::error::ClaimError;

/// Persisted per-cadence progress.
///
/// Mutated only by `claim`, the deadline reset inside `evaluate`, and the
/// administrative `reset`. Everything else about a track is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrackState {
    /// When the reward was last claimed. `None` means claimable now.
    #[serde(default)]
    pub last_claim: Option<DateTime<Utc>>,
    /// Index into the reward list granted on the next claim.
    #[serde(default)]
    pub active_slot: usize,
}

/// Snapshot of eligibility at a single instant. Recomputed every tick,
/// never cached across ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub claimable: bool,
    /// Seconds until the cooldown elapses. Zero when claimable.
    pub remaining_secs: u64,
    /// Cooldown progress in `[0, 1]`. 1.0 when claimable.
    pub progress: f64,
}

impl Evaluation {
    fn claimable_now() -> Self {
        Self {
            claimable: true,
            remaining_secs: 0,
            progress: 1.0,
        }
    }
}

/// One cadence's reward state machine.
///
/// Operates on wall-clock deltas -- no internal thread. The caller passes
/// `now` so the same logic is exercised by the ticking driver and by tests.
#[derive(Debug, Clone)]
pub struct RewardTrack {
    cadence: Cadence,
    config: CadenceConfig,
    state: TrackState,
    /// Set when `state` has mutations not yet persisted.
    dirty: bool,
}

impl RewardTrack {
    /// Create a track with fresh state (claimable, slot 0).
    pub fn new(cadence: Cadence, config: CadenceConfig) -> Self {
        Self {
            cadence,
            config,
            state: TrackState::default(),
            dirty: false,
        }
    }

    /// Create a track from persisted state, validating it against the
    /// configured reward list. An out-of-range slot index resets the track
    /// and marks it dirty so the repaired state is written back.
    pub fn with_state(cadence: Cadence, config: CadenceConfig, state: TrackState) -> Self {
        let valid = state.active_slot < config.rewards.len();
        Self {
            cadence,
            config,
            state: if valid { state } else { TrackState::default() },
            dirty: !valid,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn config(&self) -> &CadenceConfig {
        &self.config
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn active_slot(&self) -> usize {
        self.state.active_slot
    }

    /// Whether `state` holds mutations not yet persisted.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// A slot is shown unlocked once the cycle has reached it.
    pub fn slot_unlocked(&self, slot: usize) -> bool {
        slot <= self.state.active_slot
    }

    /// Per-slot unlocked flags, one per reward definition.
    pub fn slots_unlocked(&self) -> Vec<bool> {
        (0..self.config.rewards.len())
            .map(|i| self.slot_unlocked(i))
            .collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Recompute eligibility at `now`.
    ///
    /// Comparisons use whole elapsed seconds (truncated) so sub-second
    /// precision cannot make a claim available a tick early. Crossing the
    /// deadline forfeits progress: the state resets to `(None, 0)` and the
    /// track becomes claimable again from slot 0.
    pub fn evaluate(&mut self, now: DateTime<Utc>) -> Evaluation {
        let Some(last) = self.state.last_claim else {
            return Evaluation::claimable_now();
        };

        // A last_claim in the future (clock skew) counts as zero elapsed.
        let elapsed = now.signed_duration_since(last).num_seconds().max(0) as u64;

        if elapsed >= self.config.deadline_secs {
            self.state = TrackState::default();
            self.dirty = true;
            return Evaluation::claimable_now();
        }
        if elapsed < self.config.cooldown_secs {
            return Evaluation {
                claimable: false,
                remaining_secs: self.config.cooldown_secs - elapsed,
                progress: elapsed as f64 / self.config.cooldown_secs as f64,
            };
        }
        Evaluation::claimable_now()
    }

    /// Claim the active reward at `now`.
    ///
    /// Eligibility is re-checked here rather than trusting a prior
    /// `evaluate`, so a stale caller cannot double-grant. On success the
    /// claimed slot index and its credit instruction are returned, the
    /// cooldown restarts at `now`, and the active slot advances with
    /// wraparound (the cycle never terminates).
    ///
    /// # Errors
    /// Returns `ClaimError::NotClaimable` while the cooldown is running.
    pub fn claim(&mut self, now: DateTime<Utc>) -> Result<(usize, CreditInstruction), ClaimError> {
        let eval = self.evaluate(now);
        if !eval.claimable {
            return Err(ClaimError::NotClaimable {
                remaining_secs: eval.remaining_secs,
            });
        }

        let slot = self.state.active_slot;
        let reward = self.config.rewards[slot];
        self.state.last_claim = Some(now);
        self.state.active_slot = (slot + 1) % self.config.rewards.len();
        self.dirty = true;
        Ok((
            slot,
            CreditInstruction {
                kind: reward.kind,
                amount: reward.amount,
            },
        ))
    }

    /// Administrative reset: back to fresh state, no time-window checks.
    pub fn reset(&mut self) {
        self.state = TrackState::default();
        self.dirty = true;
    }

    /// Mark the in-memory state as persisted.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
