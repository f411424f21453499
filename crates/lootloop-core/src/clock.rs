//! Periodic evaluation driver.
//!
//! `RewardClock` owns a background tokio task that fires once per second,
//! locks the shared `RewardManager`, evaluates every track against the
//! current wall clock, and publishes the snapshots through a watch channel.
//! The channel is push-only and latest-value-wins: a subscriber that misses
//! an intermediate tick simply sees the next one.
//!
//! Eligibility never depends on how many ticks actually fired - a process
//! suspended for days resumes with correct state on the first tick back,
//! because every evaluation starts from `Utc::now()`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::events::TrackSnapshot;
use crate::ledger::CurrencyLedger;
use crate::manager::RewardManager;
use crate::storage::TrackStore;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to the ticking task. Dropping it aborts the task; prefer
/// `shutdown` for a clean stop.
pub struct RewardClock {
    handle: Option<JoinHandle<()>>,
    stop: watch::Sender<bool>,
    snapshots: watch::Receiver<Vec<TrackSnapshot>>,
}

impl RewardClock {
    /// Spawn the ticking task. The first evaluation happens immediately.
    pub fn spawn<S, L>(manager: Arc<Mutex<RewardManager<S, L>>>) -> Self
    where
        S: TrackStore + Send + 'static,
        L: CurrencyLedger + Send + 'static,
    {
        let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK_PERIOD);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let snapshots = manager.lock().unwrap().tick(Utc::now());
                        if snapshot_tx.send(snapshots).is_err() {
                            break;
                        }
                    }
                    _ = stop_rx.changed() => break,
                }
            }
        });

        Self {
            handle: Some(handle),
            stop: stop_tx,
            snapshots: snapshot_rx,
        }
    }

    /// Subscribe to published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Vec<TrackSnapshot>> {
        self.snapshots.clone()
    }

    /// Stop the ticking task and wait for it to finish.
    pub async fn shutdown(mut self) {
        let _ = self.stop.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for RewardClock {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
