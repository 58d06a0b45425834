//! # lodestone
//!
//! Loot list engine for Lodestone resource hubs.
//!
//! This library provides the algorithmic half of list generation:
//! - Resolve configured rarity weights into a lookup table
//! - Draw a rarity-weighted sample of provisions (with replacement)
//! - Price each distinct provision once within the hub's modifier band
//! - Aggregate repeated draws into `{id, name, price, count, rarity}` rows
//!
//! Everything here is synchronous and pure apart from the caller-supplied RNG.
//! Loading hubs, provisions and settings is the job of `lodestone-store`.
//!
//! ## Example
//!
//! ```
//! use lodestone::{generate_list, Provision, RarityTable, ResourceHub};
//! use rand::SeedableRng;
//!
//! let hub = ResourceHub {
//!     id: "market".into(),
//!     name: "Night Market".into(),
//!     image_url: None,
//!     min_provisions: 2,
//!     max_provisions: 2,
//!     upper_price_modifier: 0.0,
//!     lower_price_modifier: 0.0,
//!     selected_provisions: vec!["p1".into()],
//! };
//! let torch = Provision::new("p1", "Torch", 50.0, "Common");
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let list = generate_list(&hub, &RarityTable::fallback(), vec![torch], &mut rng);
//!
//! assert_eq!(list.items.len(), 1);
//! assert_eq!(list.items[0].count, 2);
//! assert_eq!(list.items[0].price, 50.0);
//! ```

pub mod distribution;
pub mod generate;
pub mod price;
pub mod rarity;
pub mod select;
pub mod types;

#[doc(inline)]
pub use distribution::{ShareRow, WeightReport};
#[doc(inline)]
pub use generate::{aggregate, generate_list, random_count, weighted_pool};
#[doc(inline)]
pub use price::{round_cents, PriceBand};
#[doc(inline)]
pub use rarity::{
    default_rarity_options, RarityTable, DEFAULT_WEIGHT, FALLBACK_WEIGHTS, RANDOM_SENTINEL,
};
#[doc(inline)]
pub use select::{WeightedEntry, WeightedPool};
#[doc(inline)]
pub use types::{
    GeneratedItem, GeneratedList, ParseError, Provision, RarityOption, RaritySettings,
    RarityWeightSetting, ResourceHub,
};
