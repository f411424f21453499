mod engine;
mod reward;

pub use engine::{Evaluation, RewardTrack, TrackState};
pub use reward::{Cadence, CadenceConfig, CreditInstruction, RewardDefinition, RewardKind};
