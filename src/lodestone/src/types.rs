//! Record types shared by the engine, the store adapters and the API.
//!
//! Store documents are validated into these types at the adapter boundary;
//! the engine never sees untyped data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors raised while coercing raw document values into typed records
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid rarity weight: {0}")]
    InvalidWeight(String),

    #[error("Invalid base price for provision {id}: {value}")]
    InvalidBasePrice { id: String, value: f64 },

    #[error("Missing field '{field}' on {record}")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },
}

// ============================================================================
// Rarity settings
// ============================================================================

/// Configured weight for a rarity label.
///
/// The settings document stores either a number or the sentinel `"random"`.
/// Anything else that arrives from the store is kept as `Unparsed` so the
/// resolver can fall back to the default weight instead of rejecting the
/// whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWeight", into = "RawWeight")]
pub enum RarityWeightSetting {
    Fixed(f64),
    Random,
    Unparsed(String),
}

impl Default for RarityWeightSetting {
    fn default() -> Self {
        Self::Unparsed(String::new())
    }
}

impl std::fmt::Display for RarityWeightSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(w) => write!(f, "{}", w),
            Self::Random => write!(f, "{}", crate::rarity::RANDOM_SENTINEL),
            Self::Unparsed(s) => write!(f, "{:?}", s),
        }
    }
}

impl std::str::FromStr for RarityWeightSetting {
    type Err = ParseError;

    /// Parse a weight as typed by an admin: a number (surrounding whitespace
    /// ignored) or the `random` sentinel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(crate::rarity::RANDOM_SENTINEL) {
            return Ok(Self::Random);
        }
        trimmed
            .parse::<f64>()
            .map(Self::Fixed)
            .map_err(|_| ParseError::InvalidWeight(s.to_string()))
    }
}

/// Wire form of a weight: whatever JSON value the settings document holds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawWeight {
    Number(f64),
    Text(String),
    Other(Value),
}

impl From<RawWeight> for RarityWeightSetting {
    fn from(raw: RawWeight) -> Self {
        match raw {
            RawWeight::Number(n) => Self::Fixed(n),
            RawWeight::Text(s) => s.parse().unwrap_or(Self::Unparsed(s)),
            RawWeight::Other(v) => Self::Unparsed(v.to_string()),
        }
    }
}

impl From<RarityWeightSetting> for RawWeight {
    fn from(setting: RarityWeightSetting) -> Self {
        match setting {
            RarityWeightSetting::Fixed(n) => RawWeight::Number(n),
            RarityWeightSetting::Random => {
                RawWeight::Text(crate::rarity::RANDOM_SENTINEL.to_string())
            }
            RarityWeightSetting::Unparsed(s) => RawWeight::Text(s),
        }
    }
}

/// One row of the rarity settings document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityOption {
    /// Rarity label (e.g. "Common", "Very Rare")
    pub value: String,
    #[serde(default)]
    pub weight: RarityWeightSetting,
}

impl RarityOption {
    pub fn new(value: impl Into<String>, weight: RarityWeightSetting) -> Self {
        Self {
            value: value.into(),
            weight,
        }
    }
}

/// The `settings/rarity` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaritySettings {
    #[serde(default)]
    pub options: Vec<RarityOption>,
}

// ============================================================================
// Provisions and hubs
// ============================================================================

fn default_rarity() -> String {
    "Common".to_string()
}

/// An item definition eligible for inclusion in generated lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provision {
    /// Document id (taken from the store key, not the document body)
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default = "default_rarity")]
    pub rarity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_hubs: Vec<String>,
}

impl Provision {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_price: f64,
        rarity: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_price,
            rarity: rarity.into(),
            image_url: None,
            selected_hubs: Vec::new(),
        }
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ParseError> {
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(ParseError::InvalidBasePrice {
                id: self.id.clone(),
                value: self.base_price,
            });
        }
        Ok(())
    }
}

/// A named pool of provisions with quantity and pricing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHub {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub min_provisions: u32,
    /// Always `>= min_provisions` once loaded through the store
    pub max_provisions: u32,
    /// Percentage added to the base price for the top of the band
    pub upper_price_modifier: f64,
    /// Percentage taken off the base price for the bottom of the band
    pub lower_price_modifier: f64,
    pub selected_provisions: Vec<String>,
}

// ============================================================================
// Output
// ============================================================================

/// One aggregated row of a generated list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub count: u32,
    pub rarity: String,
}

/// A freshly generated loot list. Never persisted server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedList {
    pub hub_name: String,
    pub items: Vec<GeneratedItem>,
}

impl GeneratedList {
    /// Total number of draws represented by this list
    pub fn total_count(&self) -> u32 {
        self.items.iter().map(|i| i.count).sum()
    }
}
