use chrono::Utc;
use clap::Args;
use lootloop_core::Cadence;

use crate::common::{open_manager, CadenceArg};

#[derive(Args)]
pub struct StatusArgs {
    /// Limit output to one cadence
    #[arg(long, value_enum)]
    pub cadence: Option<CadenceArg>,
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = open_manager()?;
    let mut snapshots = manager.tick(Utc::now());

    if let Some(cadence) = args.cadence {
        let cadence: Cadence = cadence.into();
        snapshots.retain(|s| s.cadence == cadence);
    }

    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}
