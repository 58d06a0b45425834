//! Seed file import.
//!
//! A seed file mirrors the store layout:
//!
//! ```json
//! {
//!   "settings": { "rarity": { "options": [ { "value": "Common", "weight": 75 } ] } },
//!   "provisions": { "p1": { "name": "Torch", "basePrice": 1, "rarity": "Common" } },
//!   "resourceHubs": { "h1": { "name": "Market", "minProvisions": 1, "maxProvisions": 4,
//!                             "upperPriceModifier": 20, "lowerPriceModifier": 20,
//!                             "selectedProvisions": ["p1"] } }
//! }
//! ```
//!
//! Every document is validated before anything is written.

use std::collections::BTreeMap;
use std::path::Path;

use lodestone::{default_rarity_options, RaritySettings};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::documents::{
    collections, hub_from_document, provision_from_document, rarity_settings_from_document,
};
use crate::repository::{AsyncDocumentWriter, StoreResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFile {
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,
    #[serde(default)]
    pub provisions: BTreeMap<String, Value>,
    #[serde(default)]
    pub resource_hubs: BTreeMap<String, Value>,
}

impl SeedFile {
    pub fn load<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Add the default rarity settings unless the file carries its own
    pub fn fill_default_rarity(&mut self) -> StoreResult<bool> {
        if self.settings.contains_key(collections::RARITY_SETTINGS_ID) {
            return Ok(false);
        }
        let settings = RaritySettings {
            options: default_rarity_options(),
        };
        self.settings.insert(
            collections::RARITY_SETTINGS_ID.to_string(),
            serde_json::to_value(settings)?,
        );
        Ok(true)
    }

    /// Check every document against its typed shape
    pub fn validate(&self) -> StoreResult<()> {
        if let Some(rarity) = self.settings.get(collections::RARITY_SETTINGS_ID) {
            rarity_settings_from_document(rarity.clone())?;
        }
        for (id, body) in &self.provisions {
            provision_from_document(id, body.clone())?;
        }
        for (id, body) in &self.resource_hubs {
            hub_from_document(id, body.clone())?;
        }
        Ok(())
    }
}

/// Counts of documents written by [`import_seed`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub settings: usize,
    pub provisions: usize,
    pub resource_hubs: usize,
}

/// Validate and write a seed file into a store
pub async fn import_seed<S: AsyncDocumentWriter>(store: &S, seed: &SeedFile) -> StoreResult<SeedStats> {
    seed.validate()?;

    let mut stats = SeedStats::default();
    for (id, body) in &seed.settings {
        store.put_document(collections::SETTINGS, id, body).await?;
        stats.settings += 1;
    }
    for (id, body) in &seed.provisions {
        store.put_document(collections::PROVISIONS, id, body).await?;
        stats.provisions += 1;
    }
    for (id, body) in &seed.resource_hubs {
        store.put_document(collections::RESOURCE_HUBS, id, body).await?;
        stats.resource_hubs += 1;
    }

    tracing::info!(
        settings = stats.settings,
        provisions = stats.provisions,
        resource_hubs = stats.resource_hubs,
        "Seed imported"
    );
    Ok(stats)
}
