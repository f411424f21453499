//! # Lootloop Core Library
//!
//! This library provides the core business logic for Lootloop, a time-gated
//! recurring reward engine. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI being
//! a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Reward Tracks**: Wall-clock-based eligibility state machines, one per
//!   cadence (daily, weekly), fed `now` by the caller
//! - **Reward Clock**: A 1-second tokio ticker that evaluates every track
//!   and pushes view-models through a watch channel
//! - **Storage**: SQLite-based track state and wallet persistence, plus a
//!   TOML reward catalog
//! - **Ledger**: Injected player balance store credited on claim
//!
//! ## Key Components
//!
//! - [`RewardTrack`]: Per-cadence eligibility state machine
//! - [`RewardManager`]: Engine facade wiring tracks, store, and ledger
//! - [`RewardClock`]: Periodic evaluation driver
//! - [`Database`]: Track state and wallet persistence
//! - [`Catalog`]: Reward catalog configuration

pub mod clock;
pub mod error;
pub mod events;
pub mod ledger;
pub mod manager;
pub mod storage;
pub mod track;

pub use clock::RewardClock;
pub use error::{ClaimError, ConfigError, CoreError, StorageError};
pub use events::{Event, TrackSnapshot};
pub use ledger::{CurrencyLedger, MemoryLedger};
pub use manager::RewardManager;
pub use storage::{data_dir, Catalog, Database, MemoryStore, TrackStore};
pub use track::{
    Cadence, CadenceConfig, CreditInstruction, Evaluation, RewardDefinition, RewardKind,
    RewardTrack, TrackState,
};
