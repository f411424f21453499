use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "lootloop-cli", version, about = "Lootloop CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current eligibility and timers for every track
    Status(commands::status::StatusArgs),
    /// Claim the active reward for a cadence
    Claim(commands::claim::ClaimArgs),
    /// Reset reward progress
    Reset(commands::reset::ResetArgs),
    /// Wallet balances
    Wallet,
    /// Stream live snapshots from the reward clock
    Watch(commands::watch::WatchArgs),
    /// Reward catalog management
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status(args) => commands::status::run(args),
        Commands::Claim(args) => commands::claim::run(args),
        Commands::Reset(args) => commands::reset::run(args),
        Commands::Wallet => commands::wallet::run(),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Catalog { action } => commands::catalog::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
