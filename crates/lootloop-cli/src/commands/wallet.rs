use serde::Serialize;

use crate::common::open_manager;
use lootloop_core::RewardKind;

#[derive(Serialize)]
struct BalanceEntry {
    kind: RewardKind,
    balance: u64,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let manager = open_manager()?;
    let balances: Vec<BalanceEntry> = manager
        .balances()
        .into_iter()
        .map(|(kind, balance)| BalanceEntry { kind, balance })
        .collect();
    println!("{}", serde_json::to_string_pretty(&balances)?);
    Ok(())
}
