//! List generation: weighting, selection, pricing and aggregation.

use std::collections::HashMap;

use rand::Rng;

use crate::price::PriceBand;
use crate::rarity::RarityTable;
use crate::select::{WeightedEntry, WeightedPool};
use crate::types::{GeneratedItem, GeneratedList, Provision, ResourceHub};

/// Uniform integer in `[min, max]`. Swapped bounds are tolerated.
pub fn random_count<R: Rng + ?Sized>(min: u32, max: u32, rng: &mut R) -> usize {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi) as usize
}

/// Pair each provision with the weight of its rarity
pub fn weighted_pool(provisions: Vec<Provision>, rarity: &RarityTable) -> WeightedPool<Provision> {
    provisions
        .into_iter()
        .map(|p| {
            let weight = rarity.weight_for(&p.rarity);
            WeightedEntry::new(p, weight)
        })
        .collect()
}

/// Group draws by provision id in first-occurrence order.
///
/// `price_of` runs once per distinct id; repeated draws reuse that price.
pub fn aggregate<'a, I, F>(selected: I, mut price_of: F) -> Vec<GeneratedItem>
where
    I: IntoIterator<Item = &'a Provision>,
    F: FnMut(&Provision) -> f64,
{
    let mut items: Vec<GeneratedItem> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for provision in selected {
        let existing = index.get(provision.id.as_str()).copied();
        match existing {
            Some(i) => items[i].count += 1,
            None => {
                index.insert(provision.id.as_str(), items.len());
                items.push(GeneratedItem {
                    id: provision.id.clone(),
                    name: provision.name.clone(),
                    price: price_of(provision),
                    count: 1,
                    rarity: provision.rarity.clone(),
                });
            }
        }
    }

    items
}

/// Generate a loot list for a hub from its already-loaded provisions.
///
/// The target size is drawn from `[min_provisions, max_provisions]`; an empty
/// or weightless pool yields an empty list rather than an error.
pub fn generate_list<R: Rng + ?Sized>(
    hub: &ResourceHub,
    rarity: &RarityTable,
    provisions: Vec<Provision>,
    rng: &mut R,
) -> GeneratedList {
    let pool = weighted_pool(provisions, rarity);
    let target = random_count(hub.min_provisions, hub.max_provisions, rng);
    let band = PriceBand::new(hub.lower_price_modifier, hub.upper_price_modifier);

    let selected = pool.sample(target, rng);
    let items = aggregate(selected, |p| band.roll(p.base_price, rng));

    GeneratedList {
        hub_name: hub.name.clone(),
        items,
    }
}
