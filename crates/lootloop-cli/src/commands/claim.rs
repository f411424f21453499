use chrono::Utc;
use clap::Args;

use crate::common::{open_manager, CadenceArg};

#[derive(Args)]
pub struct ClaimArgs {
    /// Which track to claim from
    #[arg(long, value_enum)]
    pub cadence: CadenceArg,
}

pub fn run(args: ClaimArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = open_manager()?;
    let event = manager.claim(args.cadence.into(), Utc::now())?;
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
