mod config;
pub mod database;
mod store;

pub use config::Catalog;
pub use database::Database;
pub use store::{MemoryStore, TrackStore};

use std::path::PathBuf;

/// Returns `~/.config/lootloop[-dev]/` based on LOOTLOOP_ENV.
///
/// Set LOOTLOOP_ENV=dev to use the development data directory, or
/// LOOTLOOP_DATA_DIR to override the location entirely (used by tests).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = if let Ok(custom) = std::env::var("LOOTLOOP_DATA_DIR") {
        PathBuf::from(custom)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("LOOTLOOP_ENV").unwrap_or_else(|_| "production".to_string());

        if env == "dev" {
            base_dir.join("lootloop-dev")
        } else {
            base_dir.join("lootloop")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
