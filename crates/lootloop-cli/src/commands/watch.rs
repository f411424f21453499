use std::sync::{Arc, Mutex};

use clap::Args;
use lootloop_core::RewardClock;

use crate::common::open_manager;

#[derive(Args)]
pub struct WatchArgs {
    /// Exit after this many snapshots instead of streaming forever
    #[arg(long)]
    pub count: Option<usize>,
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let manager = Arc::new(Mutex::new(open_manager()?));
        let clock = RewardClock::spawn(manager);
        let mut rx = clock.subscribe();

        let mut seen = 0usize;
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let line = serde_json::to_string(&*rx.borrow())?;
                    println!("{line}");
                    seen += 1;
                    if args.count.is_some_and(|count| seen >= count) {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        clock.shutdown().await;
        Ok(())
    })
}
