//! Typed loaders used by list generation.

use futures::future::try_join_all;
use lodestone::{Provision, RarityTable, ResourceHub};

use crate::documents::{
    collections, hub_from_document, provision_from_document, rarity_settings_from_document,
};
use crate::repository::{AsyncDocumentStore, StoreError, StoreResult};

/// Load a hub. A missing hub is [`StoreError::NotFound`].
pub async fn load_hub<S: AsyncDocumentStore>(store: &S, hub_id: &str) -> StoreResult<ResourceHub> {
    let body = store
        .get_document(collections::RESOURCE_HUBS, hub_id)
        .await?
        .ok_or_else(|| StoreError::not_found(collections::RESOURCE_HUBS, hub_id))?;
    hub_from_document(hub_id, body)
}

/// Load every hub, ordered by id
pub async fn list_hubs<S: AsyncDocumentStore>(store: &S) -> StoreResult<Vec<ResourceHub>> {
    store
        .get_collection(collections::RESOURCE_HUBS)
        .await?
        .into_iter()
        .map(|(id, body)| hub_from_document(&id, body))
        .collect()
}

/// Load and resolve the rarity weight table.
///
/// Falls back to the built-in table when no settings document exists.
pub async fn load_rarity_table<S: AsyncDocumentStore>(store: &S) -> StoreResult<RarityTable> {
    let doc = store
        .get_document(collections::SETTINGS, collections::RARITY_SETTINGS_ID)
        .await?;

    match doc {
        Some(body) => {
            let settings = rarity_settings_from_document(body)?;
            Ok(RarityTable::resolve(Some(&settings)))
        }
        None => {
            tracing::debug!("No rarity settings document, using fallback weights");
            Ok(RarityTable::fallback())
        }
    }
}

/// Load provisions by id, concurrently.
///
/// Ids that do not resolve are skipped. Output keeps the order of `ids`.
pub async fn load_provisions<S: AsyncDocumentStore>(
    store: &S,
    ids: &[String],
) -> StoreResult<Vec<Provision>> {
    let docs = try_join_all(
        ids.iter()
            .map(|id| store.get_document(collections::PROVISIONS, id)),
    )
    .await?;

    let mut provisions = Vec::with_capacity(docs.len());
    for (id, doc) in ids.iter().zip(docs) {
        match doc {
            Some(body) => provisions.push(provision_from_document(id, body)?),
            None => tracing::debug!(provision = %id, "Skipping missing provision"),
        }
    }
    Ok(provisions)
}
