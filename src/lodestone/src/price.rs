//! Price band rolls

use rand::Rng;

/// Round to two decimal places. Values too large to scale are returned as is.
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Asymmetric price band around a base price, as percentages.
///
/// Modifiers are not clamped: a lower modifier over 100 produces a negative
/// floor, and an inverted band collapses to the base price.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceBand {
    pub lower_percent: f64,
    pub upper_percent: f64,
}

impl PriceBand {
    pub fn new(lower_percent: f64, upper_percent: f64) -> Self {
        Self {
            lower_percent,
            upper_percent,
        }
    }

    /// `(min, max)` for a base price. Falls back to `(base, base)` when the
    /// band is inverted or its bounds or width are not finite.
    pub fn bounds(&self, base_price: f64) -> (f64, f64) {
        let min = base_price * (1.0 - self.lower_percent / 100.0);
        let max = base_price * (1.0 + self.upper_percent / 100.0);
        if min.is_finite() && max.is_finite() && (max - min).is_finite() && min <= max {
            (min, max)
        } else {
            (base_price, base_price)
        }
    }

    /// Uniform price in `[min, max)`, rounded to cents without reaching `max`.
    pub fn roll<R: Rng + ?Sized>(&self, base_price: f64, rng: &mut R) -> f64 {
        let (min, max) = self.bounds(base_price);
        if min >= max {
            return round_cents(min);
        }

        let price = round_cents(rng.gen_range(min..max));
        // Rounding up can land on `max`; step back to the last cent below it.
        let top = ((max * 100.0).ceil() - 1.0) / 100.0;
        if price >= max && top.is_finite() && top >= min {
            top
        } else {
            price
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.345_6), 12.35);
        assert_eq!(round_cents(12.344), 12.34);
        assert_eq!(round_cents(50.0), 50.0);
    }

    #[test]
    fn test_bounds() {
        let band = PriceBand::new(20.0, 30.0);
        let (min, max) = band.bounds(100.0);
        assert!((min - 80.0).abs() < 1e-9);
        assert!((max - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_roll_within_band() {
        let band = PriceBand::new(20.0, 30.0);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10_000 {
            let price = band.roll(100.0, &mut rng);
            assert!((80.0..130.0).contains(&price), "price {price}");
        }
    }

    #[test]
    fn test_roll_never_rounds_up_to_max() {
        let band = PriceBand::new(1.0, 0.0);
        let mut rng = StdRng::seed_from_u64(12);
        let top = (0..10_000)
            .map(|_| band.roll(100.0, &mut rng))
            .fold(f64::MIN, f64::max);
        assert_eq!(top, 99.99);
    }

    #[test]
    fn test_zero_width_band_is_base_price() {
        let band = PriceBand::default();
        let mut rng = StdRng::seed_from_u64(10);
        assert_eq!(band.roll(50.0, &mut rng), 50.0);
        assert_eq!(band.roll(0.0, &mut rng), 0.0);
    }

    #[test]
    fn test_inverted_band_collapses_to_base() {
        // min = 100 * 1.5, max = 100 * 0.5
        let band = PriceBand::new(-50.0, -50.0);
        assert_eq!(band.bounds(100.0), (100.0, 100.0));
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(band.roll(100.0, &mut rng), 100.0);
    }

    #[test]
    fn test_non_finite_band_collapses_to_base() {
        let band = PriceBand::new(f64::NAN, 10.0);
        assert_eq!(band.bounds(20.0), (20.0, 20.0));
    }

    #[test]
    fn test_huge_prices_stay_finite() {
        assert_eq!(round_cents(1.0e308), 1.0e308);

        let mut rng = StdRng::seed_from_u64(13);
        // Upper bound overflows: collapses to the base price
        let price = PriceBand::new(150.0, 80.0).roll(1.0e308, &mut rng);
        assert_eq!(price, 1.0e308);

        // Both bounds finite but the width overflows
        let band = PriceBand::new(150.0, 50.0);
        assert_eq!(band.bounds(1.0e308), (1.0e308, 1.0e308));
        assert!(band.roll(1.0e308, &mut rng).is_finite());

        // Large but scalable prices still roll inside the band
        let band = PriceBand::new(10.0, 10.0);
        for _ in 0..100 {
            let price = band.roll(1.0e300, &mut rng);
            assert!(price.is_finite());
            assert!((0.9e300..1.1e300).contains(&price), "price {price}");
        }
    }

    #[test]
    fn test_lower_over_hundred_goes_negative() {
        let band = PriceBand::new(150.0, 0.0);
        let (min, max) = band.bounds(10.0);
        assert_eq!(min, -5.0);
        assert_eq!(max, 10.0);
    }
}
