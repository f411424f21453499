//! Core error types for lootloop-core.
//!
//! This module defines the error hierarchy using thiserror. Claim
//! rejections are recoverable and surfaced to the caller; configuration
//! errors are fatal at startup; storage errors are non-fatal at runtime
//! (in-memory state stays authoritative and the write is retried).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lootloop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Claim attempted while ineligible
    #[error("Claim error: {0}")]
    Claim(#[from] ClaimError),

    /// Catalog/configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Claim-specific errors.
#[derive(Error, Debug)]
pub enum ClaimError {
    /// The cooldown window has not elapsed yet.
    #[error("reward not claimable yet: {remaining_secs}s of cooldown remaining")]
    NotClaimable { remaining_secs: u64 },
}

/// Catalog configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load the catalog file
    #[error("Failed to load catalog from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save the catalog file
    #[error("Failed to save catalog to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid catalog value
    #[error("Invalid catalog value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse the catalog file
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database
    #[error("Failed to open database at {path}: {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A persisted record failed validation on load
    #[error("Corrupt persisted record '{key}': {message}")]
    Corrupt { key: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
