//! `weights` subcommand

use anyhow::{bail, Context, Result};
use lodestone::RarityTable;
use lodestone_server::pipeline::GenerationInputs;
use lodestone_server::ServerSettings;

use super::open_store;

pub async fn handle(hub_id: &str, iterations: u64, settings: ServerSettings) -> Result<()> {
    if iterations == 0 {
        bail!("--iterations must be at least 1");
    }

    let store = open_store(&settings).await?;
    let inputs = GenerationInputs::load(&store, hub_id)
        .await
        .with_context(|| format!("Failed to load hub {}", hub_id))?;

    println!("Hub: {} ({} provisions)", inputs.hub.name, inputs.provisions.len());
    print!("{}", weight_table(&inputs.rarity));
    println!();

    let report = inputs.weight_report(iterations, &mut rand::thread_rng());
    print!("{}", report);
    println!();
    println!("Max rarity variance: {:.2}%", report.max_rarity_variance());

    Ok(())
}

/// Configured rarity weights, heaviest first
fn weight_table(table: &RarityTable) -> String {
    let mut out = String::from("Rarity weights:\n");
    for (label, weight) in table.sorted() {
        out.push_str(&format!("  {:<12} {}\n", label, weight));
    }
    out
}
