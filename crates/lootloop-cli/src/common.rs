use clap::ValueEnum;
use lootloop_core::{Cadence, Catalog, Database, RewardManager};

/// Cadence selector shared by the subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CadenceArg {
    Daily,
    Weekly,
}

impl From<CadenceArg> for Cadence {
    fn from(arg: CadenceArg) -> Self {
        match arg {
            CadenceArg::Daily => Cadence::Daily,
            CadenceArg::Weekly => Cadence::Weekly,
        }
    }
}

/// Open the reward engine over the default catalog and database.
pub fn open_manager() -> Result<RewardManager<Database, Database>, Box<dyn std::error::Error>> {
    let catalog = Catalog::load()?;
    let store = Database::open()?;
    let ledger = Database::open()?;
    Ok(RewardManager::open(&catalog, store, ledger)?)
}
