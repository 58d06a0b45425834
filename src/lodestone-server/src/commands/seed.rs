//! `seed` subcommand

use std::path::Path;

use anyhow::{Context, Result};
use lodestone_server::ServerSettings;
use lodestone_store::{import_seed, SeedFile};

use super::open_store;

pub async fn handle(file: &Path, default_rarity: bool, settings: ServerSettings) -> Result<()> {
    let mut seed = SeedFile::load(file)
        .with_context(|| format!("Failed to read seed file {}", file.display()))?;

    if default_rarity && seed.fill_default_rarity()? {
        tracing::info!("Using default rarity weights");
    }

    let store = open_store(&settings).await?;
    let stats = import_seed(&store, &seed)
        .await
        .context("Seed import failed")?;

    println!(
        "Imported {} settings, {} provisions, {} resource hubs",
        stats.settings, stats.provisions, stats.resource_hubs
    );

    for (collection, count) in store.counts().await? {
        println!("  {:<14} {}", collection, count);
    }

    Ok(())
}
