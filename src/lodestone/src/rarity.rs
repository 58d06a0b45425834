//! Rarity weight resolution
//!
//! Turns the configured rarity settings into a label → weight lookup table.
//! Every weight in a resolved table is finite and non-negative.

use std::collections::HashMap;

use crate::types::{RarityOption, RaritySettings, RarityWeightSetting};

/// Weight used for the `random` sentinel, unparseable weights and unknown rarities
pub const DEFAULT_WEIGHT: f64 = 50.0;

/// Sentinel stored in the settings document for a variable weight
pub const RANDOM_SENTINEL: &str = "random";

/// Weights used when no rarity settings document exists
pub const FALLBACK_WEIGHTS: &[(&str, f64)] = &[
    ("Junk", 100.0),
    ("Common", 80.0),
    ("Uncommon", 60.0),
    ("Rare", 40.0),
    ("Very Rare", 20.0),
    ("Legendary", 10.0),
    ("Artifact", 5.0),
    ("Wondrous", 2.0),
    ("Varies", DEFAULT_WEIGHT),
];

/// Options written when rarity settings are (re)seeded to their defaults
pub fn default_rarity_options() -> Vec<RarityOption> {
    use RarityWeightSetting::{Fixed, Random};

    vec![
        RarityOption::new("Junk", Fixed(100.0)),
        RarityOption::new("Common", Fixed(75.0)),
        RarityOption::new("Uncommon", Fixed(45.0)),
        RarityOption::new("Rare", Fixed(25.0)),
        RarityOption::new("Very Rare", Fixed(15.0)),
        RarityOption::new("Legendary", Fixed(3.0)),
        RarityOption::new("Artifact", Fixed(2.0)),
        RarityOption::new("Wondrous", Fixed(1.0)),
        RarityOption::new("Varies", Random),
    ]
}

impl RarityWeightSetting {
    /// Numeric weight this setting stands for
    pub fn resolve(&self) -> f64 {
        match self {
            Self::Fixed(w) if w.is_finite() => w.max(0.0),
            Self::Fixed(_) | Self::Random | Self::Unparsed(_) => DEFAULT_WEIGHT,
        }
    }
}

/// Resolved rarity label → weight table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RarityTable {
    weights: HashMap<String, f64>,
}

impl RarityTable {
    /// Table built from [`FALLBACK_WEIGHTS`]
    pub fn fallback() -> Self {
        Self {
            weights: FALLBACK_WEIGHTS
                .iter()
                .map(|(label, w)| (label.to_string(), *w))
                .collect(),
        }
    }

    /// Build from configured options. Later duplicates win.
    pub fn from_options(options: &[RarityOption]) -> Self {
        let weights = options
            .iter()
            .map(|o| (o.value.clone(), o.weight.resolve()))
            .collect();
        Self { weights }
    }

    /// Resolve the settings document, or the fallback table when it is absent.
    ///
    /// A present document with no options yields an empty table, so every
    /// rarity gets [`DEFAULT_WEIGHT`].
    pub fn resolve(settings: Option<&RaritySettings>) -> Self {
        match settings {
            Some(s) => Self::from_options(&s.options),
            None => Self::fallback(),
        }
    }

    /// Weight for a rarity label, [`DEFAULT_WEIGHT`] when unknown
    pub fn weight_for(&self, rarity: &str) -> f64 {
        self.weights.get(rarity).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Configured weight, if the label is known
    pub fn get(&self, rarity: &str) -> Option<f64> {
        self.weights.get(rarity).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Labels and weights sorted by descending weight, then label
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = self
            .weights
            .iter()
            .map(|(label, w)| (label.as_str(), *w))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_when_settings_absent() {
        let table = RarityTable::resolve(None);
        assert_eq!(table.weight_for("Junk"), 100.0);
        assert_eq!(table.weight_for("Wondrous"), 2.0);
        assert_eq!(table.weight_for("Varies"), 50.0);
        assert_eq!(table.len(), FALLBACK_WEIGHTS.len());
    }

    #[test]
    fn test_sentinel_resolves_to_default() {
        let settings = RaritySettings {
            options: vec![RarityOption::new("Varies", RarityWeightSetting::Random)],
        };
        let table = RarityTable::resolve(Some(&settings));
        assert_eq!(table.get("Varies"), Some(DEFAULT_WEIGHT));
    }

    #[test]
    fn test_bad_weights_resolve_to_default() {
        let settings = RaritySettings {
            options: vec![
                RarityOption::new("Text", RarityWeightSetting::Unparsed("many".into())),
                RarityOption::new("Nan", RarityWeightSetting::Fixed(f64::NAN)),
                RarityOption::new("Inf", RarityWeightSetting::Fixed(f64::INFINITY)),
                RarityOption::new("Negative", RarityWeightSetting::Fixed(-5.0)),
            ],
        };
        let table = RarityTable::resolve(Some(&settings));
        assert_eq!(table.get("Text"), Some(50.0));
        assert_eq!(table.get("Nan"), Some(50.0));
        assert_eq!(table.get("Inf"), Some(50.0));
        assert_eq!(table.get("Negative"), Some(0.0));
    }

    #[test]
    fn test_unknown_rarity_uses_default() {
        let settings = RaritySettings {
            options: vec![RarityOption::new("Common", RarityWeightSetting::Fixed(75.0))],
        };
        let table = RarityTable::resolve(Some(&settings));
        assert_eq!(table.weight_for("Common"), 75.0);
        assert_eq!(table.weight_for("Mythic"), DEFAULT_WEIGHT);
    }

    #[test]
    fn test_empty_document_is_not_fallback() {
        let table = RarityTable::resolve(Some(&RaritySettings::default()));
        assert!(table.is_empty());
        assert_eq!(table.weight_for("Junk"), DEFAULT_WEIGHT);
    }

    #[test]
    fn test_duplicate_labels_last_wins() {
        let table = RarityTable::from_options(&[
            RarityOption::new("Rare", RarityWeightSetting::Fixed(40.0)),
            RarityOption::new("Rare", RarityWeightSetting::Fixed(10.0)),
        ]);
        assert_eq!(table.get("Rare"), Some(10.0));
    }

    #[test]
    fn test_default_options_cover_fallback_labels() {
        let options = default_rarity_options();
        for (label, _) in FALLBACK_WEIGHTS {
            assert!(options.iter().any(|o| o.value == *label), "{label}");
        }
        let table = RarityTable::from_options(&options);
        assert_eq!(table.weight_for("Common"), 75.0);
        assert_eq!(table.weight_for("Varies"), DEFAULT_WEIGHT);
    }

    #[test]
    fn test_sorted_by_weight() {
        let table = RarityTable::fallback();
        let sorted = table.sorted();
        assert_eq!(sorted.first().map(|r| r.0), Some("Junk"));
        assert_eq!(sorted.last().map(|r| r.0), Some("Wondrous"));
    }
}
