//! Cumulative-weight sampling with replacement
//!
//! The pool partitions `[0, total)` into contiguous half-open intervals, one
//! per entry in pool order, each as long as the entry's weight. A draw picks
//! a uniform `r` in `[0, total)` and returns the entry whose interval holds
//! it. Draws never consume or adjust weights, so every draw in a request is
//! independent and identically distributed.

use rand::Rng;

/// An item paired with its selection weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEntry<T> {
    pub item: T,
    pub weight: f64,
}

impl<T> WeightedEntry<T> {
    pub fn new(item: T, weight: f64) -> Self {
        Self { item, weight }
    }
}

/// A weighted pool with its cumulative interval table precomputed
#[derive(Debug, Clone)]
pub struct WeightedPool<T> {
    entries: Vec<WeightedEntry<T>>,
    /// Exclusive end of each entry's interval
    ends: Vec<f64>,
    total: f64,
}

/// Non-finite and negative weights count as zero
fn effective_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

impl<T> WeightedPool<T> {
    pub fn new(entries: Vec<WeightedEntry<T>>) -> Self {
        let mut ends = Vec::with_capacity(entries.len());
        let mut acc = 0.0;
        for entry in &entries {
            acc += effective_weight(entry.weight);
            ends.push(acc);
        }
        Self {
            entries,
            ends,
            total: acc,
        }
    }

    pub fn entries(&self) -> &[WeightedEntry<T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// True when at least one draw can succeed
    pub fn can_draw(&self) -> bool {
        self.total > 0.0 && self.total.is_finite()
    }

    /// Probability of a single draw landing on entry `index`
    pub fn probability(&self, index: usize) -> f64 {
        match self.entries.get(index) {
            Some(entry) if self.can_draw() => effective_weight(entry.weight) / self.total,
            _ => 0.0,
        }
    }

    /// Entry index owning point `r` of `[0, total)`.
    fn locate(&self, r: f64) -> Option<usize> {
        let mut start = 0.0;
        for (i, end) in self.ends.iter().enumerate() {
            if r >= start && r < *end {
                return Some(i);
            }
            start = *end;
        }
        // Rounding can leave r a hair past the last end; hand it to the last
        // entry that owns a non-empty interval.
        self.entries
            .iter()
            .rposition(|e| effective_weight(e.weight) > 0.0)
    }

    /// Index of one weighted draw, `None` when the pool is empty or weightless
    pub fn draw_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if !self.can_draw() {
            return None;
        }
        let r = rng.gen_range(0.0..self.total);
        self.locate(r)
    }

    /// One weighted draw
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        self.draw_index(rng).map(|i| &self.entries[i].item)
    }

    /// Exactly `count` independent draws, or nothing when the pool cannot be
    /// drawn from.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&T> {
        if !self.can_draw() {
            return Vec::new();
        }
        (0..count).filter_map(|_| self.draw(rng)).collect()
    }
}

impl<T> FromIterator<WeightedEntry<T>> for WeightedPool<T> {
    fn from_iter<I: IntoIterator<Item = WeightedEntry<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
