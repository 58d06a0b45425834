//! Document shapes and validation at the store boundary.
//!
//! Raw JSON from the store is decoded here into the typed records of the
//! `lodestone` crate. Hub counts and modifiers are normalised so the engine
//! can rely on `min_provisions <= max_provisions <= MAX_LIST_SIZE`.

use lodestone::{ParseError, Provision, RaritySettings, ResourceHub};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::repository::{StoreError, StoreResult};

/// Well-known collection and document names
pub mod collections {
    pub const RESOURCE_HUBS: &str = "resourceHubs";
    pub const PROVISIONS: &str = "provisions";
    pub const SETTINGS: &str = "settings";

    /// Id of the rarity settings document within [`SETTINGS`]
    pub const RARITY_SETTINGS_ID: &str = "rarity";
}

fn decode<T: DeserializeOwned>(collection: &str, id: &str, body: Value) -> StoreResult<T> {
    serde_json::from_value(body).map_err(|e| StoreError::Malformed {
        collection: collection.to_string(),
        id: id.to_string(),
        message: e.to_string(),
    })
}

/// Resource hub document as stored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub min_provisions: Option<f64>,
    #[serde(default)]
    pub max_provisions: Option<f64>,
    #[serde(default)]
    pub upper_price_modifier: Option<f64>,
    #[serde(default)]
    pub lower_price_modifier: Option<f64>,
    #[serde(default)]
    pub selected_provisions: Vec<String>,
}

/// Upper limit on a hub's list size; larger stored counts are clamped to it
pub const MAX_LIST_SIZE: u32 = 1_000;

/// Whole count in `0..=MAX_LIST_SIZE`; missing or non-finite values become 0
fn count(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.floor().min(f64::from(MAX_LIST_SIZE)) as u32,
        _ => 0,
    }
}

fn modifier(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl HubDocument {
    /// Validate into a [`ResourceHub`] keyed by `id`.
    ///
    /// Duplicate provision ids are dropped, keeping the first occurrence.
    pub fn into_hub(self, id: &str) -> Result<ResourceHub, ParseError> {
        let name = self.name.ok_or(ParseError::MissingField {
            record: "resource hub",
            field: "name",
        })?;

        let min_provisions = count(self.min_provisions);
        let max_provisions = count(self.max_provisions).max(min_provisions);

        let mut selected_provisions: Vec<String> = Vec::with_capacity(self.selected_provisions.len());
        for pid in self.selected_provisions {
            if !selected_provisions.contains(&pid) {
                selected_provisions.push(pid);
            }
        }

        Ok(ResourceHub {
            id: id.to_string(),
            name,
            image_url: self.image_url,
            min_provisions,
            max_provisions,
            upper_price_modifier: modifier(self.upper_price_modifier),
            lower_price_modifier: modifier(self.lower_price_modifier),
            selected_provisions,
        })
    }
}

/// Decode a hub document
pub fn hub_from_document(id: &str, body: Value) -> StoreResult<ResourceHub> {
    let doc: HubDocument = decode(collections::RESOURCE_HUBS, id, body)?;
    Ok(doc.into_hub(id)?)
}

/// Decode a provision document. The store key always wins over any `id`
/// field in the body.
pub fn provision_from_document(id: &str, body: Value) -> StoreResult<Provision> {
    let mut provision: Provision = decode(collections::PROVISIONS, id, body)?;
    provision.id = id.to_string();
    provision.validate()?;
    Ok(provision)
}

/// Decode the rarity settings document
pub fn rarity_settings_from_document(body: Value) -> StoreResult<RaritySettings> {
    decode(
        collections::SETTINGS,
        collections::RARITY_SETTINGS_ID,
        body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone::RarityWeightSetting;
    use serde_json::json;

    #[test]
    fn test_hub_from_document() {
        let hub = hub_from_document(
            "h1",
            json!({
                "name": "Ironforge Exchange",
                "imageUrl": "https://img.example/forge.png",
                "minProvisions": 1,
                "maxProvisions": 5,
                "upperPriceModifier": 20,
                "lowerPriceModifier": 15.5,
                "selectedProvisions": ["a", "b", "a"]
            }),
        )
        .unwrap();

        assert_eq!(hub.id, "h1");
        assert_eq!(hub.min_provisions, 1);
        assert_eq!(hub.max_provisions, 5);
        assert_eq!(hub.upper_price_modifier, 20.0);
        assert_eq!(hub.lower_price_modifier, 15.5);
        assert_eq!(hub.selected_provisions, vec!["a", "b"]);
    }

    #[test]
    fn test_hub_defaults_and_normalisation() {
        let hub = hub_from_document(
            "h2",
            json!({"name": "Empty Stall", "minProvisions": 4, "maxProvisions": 2}),
        )
        .unwrap();
        assert_eq!(hub.min_provisions, 4);
        assert_eq!(hub.max_provisions, 4);
        assert_eq!(hub.upper_price_modifier, 0.0);
        assert_eq!(hub.lower_price_modifier, 0.0);
        assert!(hub.selected_provisions.is_empty());

        let hub = hub_from_document(
            "h3",
            json!({"name": "Odd", "minProvisions": -3, "maxProvisions": 2.7}),
        )
        .unwrap();
        assert_eq!((hub.min_provisions, hub.max_provisions), (0, 2));
    }

    #[test]
    fn test_hub_counts_are_capped() {
        let hub = hub_from_document(
            "h6",
            json!({"name": "Bottomless Bazaar", "minProvisions": 5e9, "maxProvisions": 1e10}),
        )
        .unwrap();
        assert_eq!(hub.min_provisions, MAX_LIST_SIZE);
        assert_eq!(hub.max_provisions, MAX_LIST_SIZE);

        let hub = hub_from_document(
            "h7",
            json!({"name": "Busy Stall", "minProvisions": 3, "maxProvisions": 1e10}),
        )
        .unwrap();
        assert_eq!((hub.min_provisions, hub.max_provisions), (3, MAX_LIST_SIZE));
    }

    #[test]
    fn test_hub_requires_name() {
        let err = hub_from_document("h4", json!({"minProvisions": 1})).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Parse(ParseError::MissingField { field: "name", .. })
        ));
    }

    #[test]
    fn test_hub_wrong_shape_is_malformed() {
        let err = hub_from_document("h5", json!({"name": "X", "selectedProvisions": "a"}))
            .unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_provision_key_wins() {
        let p = provision_from_document(
            "p1",
            json!({"id": "stale", "name": "Torch", "basePrice": 0.5, "rarity": "Common"}),
        )
        .unwrap();
        assert_eq!(p.id, "p1");
        assert_eq!(p.base_price, 0.5);
    }

    #[test]
    fn test_provision_negative_price_rejected() {
        let err = provision_from_document("p2", json!({"name": "Debt", "basePrice": -3}))
            .unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_rarity_settings_document() {
        let settings = rarity_settings_from_document(json!({
            "options": [
                {"value": "Common", "weight": 75},
                {"value": "Varies", "weight": "random"}
            ]
        }))
        .unwrap();
        assert_eq!(settings.options.len(), 2);
        assert_eq!(settings.options[1].weight, RarityWeightSetting::Random);
    }
}
