//! Expected vs observed selection shares for a weighted pool
//!
//! Used to sanity-check a rarity configuration: run many independent single
//! draws and compare the observed share of each rarity and each item with
//! the share its weight predicts.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;

use crate::select::WeightedPool;
use crate::types::Provision;

/// Expected and observed share for one rarity or item
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRow {
    pub label: String,
    /// Rarity of the item (item rows only)
    pub rarity: Option<String>,
    pub hits: u64,
    pub expected_percent: f64,
    pub actual_percent: f64,
}

impl ShareRow {
    /// Observed minus expected, in percentage points
    pub fn variance(&self) -> f64 {
        self.actual_percent - self.expected_percent
    }
}

/// Outcome of a distribution run
#[derive(Debug, Clone, PartialEq)]
pub struct WeightReport {
    pub iterations: u64,
    pub by_rarity: Vec<ShareRow>,
    pub by_item: Vec<ShareRow>,
}

impl WeightReport {
    /// Run `iterations` single draws against `pool`.
    ///
    /// Rows keep pool order (first appearance for rarities). Items sharing
    /// a name are reported separately under their id.
    pub fn run<R: Rng + ?Sized>(
        pool: &WeightedPool<Provision>,
        iterations: u64,
        rng: &mut R,
    ) -> Self {
        let mut item_hits = vec![0u64; pool.len()];
        for _ in 0..iterations {
            if let Some(i) = pool.draw_index(rng) {
                item_hits[i] += 1;
            }
        }

        let percent = |hits: u64| {
            if iterations == 0 {
                0.0
            } else {
                hits as f64 / iterations as f64 * 100.0
            }
        };

        let mut by_item = Vec::with_capacity(pool.len());
        let mut by_rarity: Vec<ShareRow> = Vec::new();
        let mut rarity_index: HashMap<&str, usize> = HashMap::new();

        for (i, entry) in pool.entries().iter().enumerate() {
            let provision = &entry.item;
            let expected = pool.probability(i) * 100.0;
            let hits = item_hits[i];

            by_item.push(ShareRow {
                label: format!("{} [{}]", provision.name, provision.id),
                rarity: Some(provision.rarity.clone()),
                hits,
                expected_percent: expected,
                actual_percent: percent(hits),
            });

            let slot = *rarity_index
                .entry(provision.rarity.as_str())
                .or_insert_with(|| {
                    by_rarity.push(ShareRow {
                        label: provision.rarity.clone(),
                        rarity: None,
                        hits: 0,
                        expected_percent: 0.0,
                        actual_percent: 0.0,
                    });
                    by_rarity.len() - 1
                });
            let row = &mut by_rarity[slot];
            row.hits += hits;
            row.expected_percent += expected;
            row.actual_percent = percent(row.hits);
        }

        Self {
            iterations,
            by_rarity,
            by_item,
        }
    }

    /// Largest absolute rarity variance, in percentage points
    pub fn max_rarity_variance(&self) -> f64 {
        self.by_rarity
            .iter()
            .map(|r| r.variance().abs())
            .fold(0.0, f64::max)
    }
}

fn write_rows(f: &mut fmt::Formatter<'_>, rows: &[ShareRow]) -> fmt::Result {
    for row in rows {
        match &row.rarity {
            Some(rarity) => writeln!(f, "{} ({}):", row.label, rarity)?,
            None => writeln!(f, "{}:", row.label)?,
        }
        writeln!(f, "  Expected: {:.2}%", row.expected_percent)?;
        writeln!(f, "  Actual:   {:.2}%", row.actual_percent)?;
        writeln!(f, "  Variance: {:.2}%", row.variance())?;
    }
    Ok(())
}

impl fmt::Display for WeightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Weight Distribution ===")?;
        writeln!(f, "Total iterations: {}", self.iterations)?;
        writeln!(f)?;
        writeln!(f, "By Rarity:")?;
        write_rows(f, &self.by_rarity)?;
        writeln!(f)?;
        writeln!(f, "By Item:")?;
        write_rows(f, &self.by_item)
    }
}
