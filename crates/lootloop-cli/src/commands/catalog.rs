use clap::Subcommand;
use lootloop_core::{data_dir, Catalog};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Print the active catalog as JSON
    Show,
    /// Print the catalog file location
    Path,
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::Show => {
            let catalog = Catalog::load()?;
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        CatalogAction::Path => {
            let path = data_dir()?.join("catalog.toml");
            println!("{}", path.display());
        }
    }
    Ok(())
}
