use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named recurrence period. Each cadence owns its own cooldown,
/// deadline, and reward list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
}

impl Cadence {
    /// Every cadence the engine tracks, in display order.
    pub const ALL: [Cadence; 2] = [Cadence::Daily, Cadence::Weekly];

    /// Stable name, also used as the persistence key.
    pub fn as_str(self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a reward slot pays out. `None` grants nothing but still
/// consumes the slot when claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    None,
    Wood,
    Diamond,
}

impl RewardKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RewardKind::None => "none",
            RewardKind::Wood => "wood",
            RewardKind::Diamond => "diamond",
        }
    }
}

/// One entry in a cadence's ordered reward list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDefinition {
    pub kind: RewardKind,
    pub amount: u32,
}

/// Per-cadence timing windows and reward list.
///
/// The deadline is the grace period before progress resets; it must be
/// at least as long as the cooldown, otherwise a claimed reward could
/// never become available again before being wiped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadenceConfig {
    /// Minimum elapsed seconds after a claim before the next claim.
    pub cooldown_secs: u64,
    /// Maximum elapsed seconds after a claim before progress is forfeited.
    pub deadline_secs: u64,
    pub rewards: Vec<RewardDefinition>,
}

impl CadenceConfig {
    /// Validate the windows and reward list.
    ///
    /// # Errors
    /// Returns an error if the reward list is empty, the cooldown is
    /// zero, or the deadline is shorter than the cooldown.
    pub fn validate(&self, cadence: Cadence) -> Result<(), ConfigError> {
        if self.rewards.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: format!("{cadence}.rewards"),
                message: "reward list must not be empty".into(),
            });
        }
        if self.cooldown_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: format!("{cadence}.cooldown_secs"),
                message: "cooldown must be greater than zero".into(),
            });
        }
        if self.deadline_secs < self.cooldown_secs {
            return Err(ConfigError::InvalidValue {
                key: format!("{cadence}.deadline_secs"),
                message: format!(
                    "deadline ({}) must be at least the cooldown ({})",
                    self.deadline_secs, self.cooldown_secs
                ),
            });
        }
        Ok(())
    }
}

/// Instruction emitted by a successful claim, consumed by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditInstruction {
    pub kind: RewardKind,
    pub amount: u32,
}
