//! TOML-based reward catalog.
//!
//! One `CadenceConfig` per cadence: cooldown/deadline windows plus the
//! ordered reward list. Stored at `~/.config/lootloop/catalog.toml`; a
//! missing file is seeded with the built-in catalog on first run. Validation
//! happens at load time and is fatal - a malformed catalog is not
//! recoverable at runtime.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::track::{Cadence, CadenceConfig, RewardDefinition, RewardKind};

/// Reward catalog: cadence name -> windows + reward list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_daily")]
    pub daily: CadenceConfig,
    #[serde(default = "default_weekly")]
    pub weekly: CadenceConfig,
}

fn default_daily() -> CadenceConfig {
    CadenceConfig {
        cooldown_secs: 86_400,
        deadline_secs: 172_800,
        rewards: vec![
            RewardDefinition {
                kind: RewardKind::Wood,
                amount: 10,
            },
            RewardDefinition {
                kind: RewardKind::Diamond,
                amount: 1,
            },
            RewardDefinition {
                kind: RewardKind::Wood,
                amount: 20,
            },
        ],
    }
}

fn default_weekly() -> CadenceConfig {
    CadenceConfig {
        cooldown_secs: 604_800,
        deadline_secs: 1_209_600,
        rewards: vec![
            RewardDefinition {
                kind: RewardKind::Diamond,
                amount: 5,
            },
            RewardDefinition {
                kind: RewardKind::Wood,
                amount: 100,
            },
            RewardDefinition {
                kind: RewardKind::Diamond,
                amount: 10,
            },
        ],
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            daily: default_daily(),
            weekly: default_weekly(),
        }
    }
}

impl Catalog {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("catalog.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("catalog.toml"))
    }

    pub fn get(&self, cadence: Cadence) -> &CadenceConfig {
        match cadence {
            Cadence::Daily => &self.daily,
            Cadence::Weekly => &self.weekly,
        }
    }

    /// Validate every cadence.
    ///
    /// # Errors
    /// Returns an error for an empty reward list, a zero cooldown, or a
    /// deadline shorter than the cooldown.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for cadence in Cadence::ALL {
            self.get(cadence).validate(cadence)?;
        }
        Ok(())
    }

    /// Load from the default location, seeding the built-in catalog if the
    /// file does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the file cannot be parsed, fails validation, or
    /// the seeded default cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path (used by tests).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let catalog = match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let catalog = Self::default();
                catalog.save_to(path)?;
                catalog
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_validates() {
        let catalog = Catalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.daily.cooldown_secs, 86_400);
        assert_eq!(catalog.daily.deadline_secs, 172_800);
        assert_eq!(catalog.daily.rewards.len(), 3);
        assert_eq!(catalog.weekly.cooldown_secs, 604_800);
    }

    #[test]
    fn default_catalog_roundtrip() {
        let catalog = Catalog::default();
        let toml_str = toml::to_string_pretty(&catalog).unwrap();
        let parsed: Catalog = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn missing_cadence_falls_back_to_default() {
        let parsed: Catalog = toml::from_str(
            r#"
            [daily]
            cooldown_secs = 60
            deadline_secs = 120
            rewards = [{ kind = "wood", amount = 1 }]
            "#,
        )
        .unwrap();
        assert_eq!(parsed.daily.cooldown_secs, 60);
        assert_eq!(parsed.weekly, default_weekly());
    }

    #[test]
    fn invalid_windows_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
            [daily]
            cooldown_secs = 120
            deadline_secs = 60
            rewards = [{ kind = "wood", amount = 1 }]
            "#,
        )
        .unwrap();
        let err = Catalog::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn missing_file_is_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        let catalog = Catalog::load_from(&path).unwrap();
        assert_eq!(catalog, Catalog::default());
        assert!(path.exists());

        // Second load reads the seeded file back.
        assert_eq!(Catalog::load_from(&path).unwrap(), catalog);
    }

    #[test]
    fn unknown_reward_kind_fails_parse() {
        let result: Result<Catalog, _> = toml::from_str(
            r#"
            [daily]
            cooldown_secs = 60
            deadline_secs = 120
            rewards = [{ kind = "gold", amount = 1 }]
            "#,
        );
        assert!(result.is_err());
    }
}
