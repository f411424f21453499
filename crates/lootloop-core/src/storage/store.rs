use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;
use crate::track::{Cadence, TrackState};

/// Durable per-cadence reward state.
///
/// One structured record per cadence, keyed by the cadence name so the
/// daily and weekly tracks can never collide. A failed `save` is non-fatal:
/// in-memory state stays authoritative and the write is retried on the next
/// mutation or tick.
pub trait TrackStore {
    /// # Errors
    /// Returns an error if the record cannot be read or fails validation.
    fn load(&self, cadence: Cadence) -> Result<Option<TrackState>, StorageError>;

    /// # Errors
    /// Returns an error if the record cannot be written.
    fn save(&self, cadence: Cadence, state: &TrackState) -> Result<(), StorageError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: RefCell<HashMap<Cadence, TrackState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrackStore for MemoryStore {
    fn load(&self, cadence: Cadence) -> Result<Option<TrackState>, StorageError> {
        Ok(self.states.borrow().get(&cadence).cloned())
    }

    fn save(&self, cadence: Cadence, state: &TrackState) -> Result<(), StorageError> {
        self.states.borrow_mut().insert(cadence, state.clone());
        Ok(())
    }
}
