//! SQLite-based persistence.
//!
//! Provides durable storage for:
//! - Per-cadence reward track state (last claim timestamp + active slot)
//! - Player wallet balances
//!
//! Timestamps are stored as RFC 3339 text. Wallet balances are cached in
//! memory at open and stay authoritative there; a failed write leaves the
//! cache dirty and is retried on the next credit.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use super::store::TrackStore;
use crate::error::StorageError;
use crate::ledger::CurrencyLedger;
use crate::track::{Cadence, RewardKind, TrackState};

#[derive(Debug, Default)]
struct WalletCache {
    balances: HashMap<RewardKind, u64>,
    dirty: bool,
}

/// SQLite database holding reward track state and wallet balances.
pub struct Database {
    conn: Connection,
    wallet: RefCell<WalletCache>,
}

impl Database {
    /// Open the database at `~/.config/lootloop/lootloop.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(|e| StorageError::OpenFailed {
            path: "lootloop.db".into(),
            message: e.to_string(),
        })?;
        let path = dir.join("lootloop.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_conn(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::OpenFailed {
            path: ":memory:".into(),
            message: e.to_string(),
        })?;
        Self::from_conn(conn)
    }

    fn from_conn(conn: Connection) -> Result<Self, StorageError> {
        let db = Self {
            conn,
            wallet: RefCell::new(WalletCache::default()),
        };
        db.migrate()?;
        db.load_wallet()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS track_state (
                    cadence     TEXT PRIMARY KEY,
                    last_claim  TEXT,
                    active_slot INTEGER NOT NULL DEFAULT 0
                );

                CREATE TABLE IF NOT EXISTS wallet (
                    currency TEXT PRIMARY KEY,
                    balance  INTEGER NOT NULL DEFAULT 0
                );",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    fn load_wallet(&self) -> Result<(), StorageError> {
        let mut stmt = self.conn.prepare("SELECT currency, balance FROM wallet")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut cache = self.wallet.borrow_mut();
        for row in rows {
            let (currency, balance) = row?;
            let kind = match currency.as_str() {
                "wood" => RewardKind::Wood,
                "diamond" => RewardKind::Diamond,
                other => {
                    return Err(StorageError::Corrupt {
                        key: format!("wallet/{other}"),
                        message: "unknown currency".into(),
                    })
                }
            };
            cache.balances.insert(kind, balance.max(0) as u64);
        }
        Ok(())
    }

    /// Write dirty wallet balances through to disk. Failure keeps the
    /// cache dirty; the next credit retries.
    fn flush_wallet(&self) {
        let mut cache = self.wallet.borrow_mut();
        if !cache.dirty {
            return;
        }
        let mut ok = true;
        for (kind, balance) in &cache.balances {
            let written = self.conn.execute(
                "INSERT OR REPLACE INTO wallet (currency, balance) VALUES (?1, ?2)",
                params![kind.as_str(), *balance as i64],
            );
            if written.is_err() {
                ok = false;
            }
        }
        if ok {
            cache.dirty = false;
        }
    }
}

impl TrackStore for Database {
    fn load(&self, cadence: Cadence) -> Result<Option<TrackState>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT last_claim, active_slot FROM track_state WHERE cadence = ?1",
                params![cadence.as_str()],
                |row| {
                    Ok((
                        row.get::<_, Option<String>>(0)?,
                        row.get::<_, i64>(1)?,
                    ))
                },
            )
            .optional()?;

        let Some((last_claim, active_slot)) = row else {
            return Ok(None);
        };

        let last_claim = match last_claim {
            Some(text) => Some(
                DateTime::parse_from_rfc3339(&text)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| StorageError::Corrupt {
                        key: format!("track_state/{cadence}"),
                        message: format!("bad timestamp '{text}': {e}"),
                    })?,
            ),
            None => None,
        };
        let active_slot = usize::try_from(active_slot).map_err(|_| StorageError::Corrupt {
            key: format!("track_state/{cadence}"),
            message: format!("negative slot index {active_slot}"),
        })?;

        Ok(Some(TrackState {
            last_claim,
            active_slot,
        }))
    }

    fn save(&self, cadence: Cadence, state: &TrackState) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO track_state (cadence, last_claim, active_slot)
             VALUES (?1, ?2, ?3)",
            params![
                cadence.as_str(),
                state.last_claim.map(|t| t.to_rfc3339()),
                state.active_slot as i64,
            ],
        )?;
        Ok(())
    }
}

impl CurrencyLedger for Database {
    fn credit(&self, kind: RewardKind, amount: u32) {
        if kind == RewardKind::None {
            return;
        }
        {
            let mut cache = self.wallet.borrow_mut();
            *cache.balances.entry(kind).or_insert(0) += u64::from(amount);
            cache.dirty = true;
        }
        self.flush_wallet();
    }

    fn balance(&self, kind: RewardKind) -> u64 {
        self.flush_wallet();
        self.wallet.borrow().balances.get(&kind).copied().unwrap_or(0)
    }
}
