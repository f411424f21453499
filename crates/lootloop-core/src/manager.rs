//! Reward engine wiring.
//!
//! `RewardManager` owns one `RewardTrack` per cadence plus the injected
//! store and ledger collaborators, and serializes every evaluate/claim/reset
//! on `&mut self`. Callers that drive it from multiple tasks wrap it in a
//! single `Mutex` (see `RewardClock`), which keeps claim's internal
//! eligibility re-check and the state mutation in one critical section.
//!
//! Persistence is write-behind with retry: a failed save leaves the
//! in-memory state authoritative and dirty, and the write is retried on the
//! next mutation or tick. A crash in that window loses at most one claim's
//! durability, never consistency.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::events::{Event, TrackSnapshot};
use crate::ledger::CurrencyLedger;
use crate::storage::{Catalog, TrackStore};
use crate::track::{Cadence, RewardKind, RewardTrack};

/// Engine facade over every reward track.
pub struct RewardManager<S: TrackStore, L: CurrencyLedger> {
    tracks: Vec<RewardTrack>,
    store: S,
    ledger: L,
}

impl<S: TrackStore, L: CurrencyLedger> RewardManager<S, L> {
    /// Build the engine from a validated catalog, loading persisted state
    /// for each cadence. State repaired during load (out-of-range slot) is
    /// written back immediately.
    ///
    /// # Errors
    /// Returns an error if the catalog fails validation or a persisted
    /// record cannot be read.
    pub fn open(catalog: &Catalog, store: S, ledger: L) -> Result<Self> {
        catalog.validate()?;

        let mut tracks = Vec::with_capacity(Cadence::ALL.len());
        for cadence in Cadence::ALL {
            let config = catalog.get(cadence).clone();
            let track = match store.load(cadence)? {
                Some(state) => RewardTrack::with_state(cadence, config, state),
                None => RewardTrack::new(cadence, config),
            };
            tracks.push(track);
        }

        let mut manager = Self {
            tracks,
            store,
            ledger,
        };
        for idx in 0..manager.tracks.len() {
            manager.persist(idx);
        }
        Ok(manager)
    }

    fn index(cadence: Cadence) -> usize {
        match cadence {
            Cadence::Daily => 0,
            Cadence::Weekly => 1,
        }
    }

    pub fn track(&self, cadence: Cadence) -> &RewardTrack {
        &self.tracks[Self::index(cadence)]
    }

    /// Evaluate every track at `now` and return view-models for the
    /// presentation layer. Deadline resets surfaced by evaluation are
    /// persisted here, and any earlier failed write is retried.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<TrackSnapshot> {
        let mut snapshots = Vec::with_capacity(self.tracks.len());
        for idx in 0..self.tracks.len() {
            let eval = self.tracks[idx].evaluate(now);
            self.persist(idx);
            let track = &self.tracks[idx];
            snapshots.push(TrackSnapshot {
                cadence: track.cadence(),
                claimable: eval.claimable,
                remaining_secs: eval.remaining_secs,
                progress: eval.progress,
                active_slot: track.active_slot(),
                slots_unlocked: track.slots_unlocked(),
                storage_lagging: track.dirty(),
                at: now,
            });
        }
        snapshots
    }

    /// Claim the active reward for `cadence` at `now`.
    ///
    /// The track re-checks eligibility internally; on success the ledger
    /// credit and the state advance happen together before the write-behind
    /// save, so neither can be observed alone.
    ///
    /// # Errors
    /// Returns `ClaimError::NotClaimable` (as `CoreError::Claim`) while the
    /// cooldown is running; nothing is credited or advanced in that case.
    pub fn claim(&mut self, cadence: Cadence, now: DateTime<Utc>) -> Result<Event> {
        let idx = Self::index(cadence);
        let (slot, credit) = self.tracks[idx].claim(now)?;
        self.ledger.credit(credit.kind, credit.amount);
        self.persist(idx);
        Ok(Event::RewardClaimed {
            cadence,
            slot,
            kind: credit.kind,
            amount: credit.amount,
            at: now,
        })
    }

    /// Administrative reset of one cadence.
    pub fn reset(&mut self, cadence: Cadence, now: DateTime<Utc>) -> Event {
        let idx = Self::index(cadence);
        self.tracks[idx].reset();
        self.persist(idx);
        Event::TrackReset { cadence, at: now }
    }

    /// Administrative reset of every cadence.
    pub fn reset_all(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        Cadence::ALL
            .into_iter()
            .map(|cadence| self.reset(cadence, now))
            .collect()
    }

    /// Current wallet balances for every creditable kind.
    pub fn balances(&self) -> Vec<(RewardKind, u64)> {
        [RewardKind::Wood, RewardKind::Diamond]
            .into_iter()
            .map(|kind| (kind, self.ledger.balance(kind)))
            .collect()
    }

    /// Write-behind save. Failure keeps the track dirty for the next retry.
    fn persist(&mut self, idx: usize) {
        if !self.tracks[idx].dirty() {
            return;
        }
        let saved = self
            .store
            .save(self.tracks[idx].cadence(), self.tracks[idx].state());
        if saved.is_ok() {
            self.tracks[idx].mark_clean();
        }
    }
}
