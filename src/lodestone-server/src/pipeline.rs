//! Generation pipeline: hub first, then rarity settings and provisions
//! concurrently, then the synchronous selection and pricing.

use lodestone::{
    generate_list, weighted_pool, GeneratedList, Provision, RarityTable, ResourceHub,
    WeightReport,
};
use lodestone_store::{loaders, AsyncDocumentStore, StoreResult};
use rand::Rng;

/// Everything one generation needs, loaded from the store
#[derive(Debug, Clone)]
pub struct GenerationInputs {
    pub hub: ResourceHub,
    pub rarity: RarityTable,
    pub provisions: Vec<Provision>,
}

impl GenerationInputs {
    /// Load the hub, then its rarity table and provisions concurrently
    pub async fn load<S: AsyncDocumentStore>(store: &S, hub_id: &str) -> StoreResult<Self> {
        let hub = loaders::load_hub(store, hub_id).await?;

        let (rarity, provisions) = tokio::join!(
            loaders::load_rarity_table(store),
            loaders::load_provisions(store, &hub.selected_provisions),
        );
        let rarity = rarity?;
        let provisions = provisions?;

        let missing = hub.selected_provisions.len() - provisions.len();
        if missing > 0 {
            tracing::debug!(hub = %hub.id, missing, "Hub references missing provisions");
        }

        Ok(Self {
            hub,
            rarity,
            provisions,
        })
    }

    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> GeneratedList {
        let list = generate_list(&self.hub, &self.rarity, self.provisions, rng);
        tracing::info!(
            hub = %self.hub.id,
            distinct = list.items.len(),
            total = list.total_count(),
            "Generated list"
        );
        list
    }

    pub fn weight_report<R: Rng + ?Sized>(self, iterations: u64, rng: &mut R) -> WeightReport {
        let pool = weighted_pool(self.provisions, &self.rarity);
        WeightReport::run(&pool, iterations, rng)
    }
}

/// Generate a list for a hub using the thread-local RNG
pub async fn generate_for_hub<S: AsyncDocumentStore>(
    store: &S,
    hub_id: &str,
) -> StoreResult<GeneratedList> {
    let inputs = GenerationInputs::load(store, hub_id).await?;
    Ok(inputs.generate(&mut rand::thread_rng()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_store::{collections, MemoryStore, StoreError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn torch_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert(
            collections::RESOURCE_HUBS,
            "h1",
            json!({
                "name": "Lamplighter's Stall",
                "minProvisions": 2,
                "maxProvisions": 2,
                "upperPriceModifier": 0,
                "lowerPriceModifier": 0,
                "selectedProvisions": ["p1", "ghost"]
            }),
        );
        store.insert(
            collections::PROVISIONS,
            "p1",
            json!({"name": "Torch", "basePrice": 50, "rarity": "Common"}),
        );
        store.insert(
            collections::SETTINGS,
            collections::RARITY_SETTINGS_ID,
            json!({"options": [{"value": "Common", "weight": 75}]}),
        );
        store
    }

    #[tokio::test]
    async fn test_load_skips_missing_provisions() {
        let inputs = GenerationInputs::load(&torch_store(), "h1").await.unwrap();
        assert_eq!(inputs.provisions.len(), 1);
        assert_eq!(inputs.rarity.weight_for("Common"), 75.0);
    }

    #[tokio::test]
    async fn test_generate_torch() {
        let list = generate_for_hub(&torch_store(), "h1").await.unwrap();
        assert_eq!(list.hub_name, "Lamplighter's Stall");
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].id, "p1");
        assert_eq!(list.items[0].price, 50.0);
        assert_eq!(list.items[0].count, 2);
    }

    #[tokio::test]
    async fn test_missing_hub() {
        let err = generate_for_hub(&torch_store(), "nowhere").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_weight_report() {
        let inputs = GenerationInputs::load(&torch_store(), "h1").await.unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let report = inputs.weight_report(1_000, &mut rng);
        assert_eq!(report.by_item.len(), 1);
        assert_eq!(report.by_item[0].hits, 1_000);
    }
}
