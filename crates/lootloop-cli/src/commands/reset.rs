use chrono::Utc;
use clap::Args;

use crate::common::{open_manager, CadenceArg};

#[derive(Args)]
pub struct ResetArgs {
    /// Reset a single cadence instead of every track
    #[arg(long, value_enum)]
    pub cadence: Option<CadenceArg>,
}

pub fn run(args: ResetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = open_manager()?;
    let now = Utc::now();
    let events = match args.cadence {
        Some(cadence) => vec![manager.reset(cadence.into(), now)],
        None => manager.reset_all(now),
    };
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}
