//! Weighted range generators.
//!
//! A range is first selected by cumulative weight, then a value is drawn
//! uniformly inside it. Overlapping ranges are accepted, which biases
//! sampling toward the overlap.

use super::choice::weighted_index;
use super::numeric::{generate_float_range, generate_int_range};
use crate::error::GenerationError;
use crate::rng_type::WeightedRange;
use rand::Rng;
use strategy_core::Value;

fn pick_range<'a, R: Rng, T>(
    rng: &mut R,
    ranges: &'a [WeightedRange<T>],
) -> Result<&'a WeightedRange<T>, GenerationError> {
    let weights: Vec<f64> = ranges.iter().map(|r| r.weight).collect();
    let idx = weighted_index(rng, &weights)?;
    ranges
        .get(idx)
        .ok_or_else(|| GenerationError::InvalidRange("weighted ranges must not be empty".into()))
}

/// Generate an integer from a weighted set of inclusive ranges.
pub fn generate_weighted_int<R: Rng>(
    rng: &mut R,
    ranges: &[WeightedRange<i64>],
) -> Result<Value, GenerationError> {
    let range = pick_range(rng, ranges)?;
    Ok(generate_int_range(rng, range.min, range.max))
}

/// Generate a float from a weighted set of inclusive ranges.
pub fn generate_weighted_float<R: Rng>(
    rng: &mut R,
    ranges: &[WeightedRange<f64>],
) -> Result<Value, GenerationError> {
    let range = pick_range(rng, ranges)?;
    Ok(generate_float_range(rng, range.min, range.max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn range<T>(min: T, max: T, weight: f64) -> WeightedRange<T> {
        WeightedRange { min, max, weight }
    }

    #[test]
    fn test_weighted_int_stays_in_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = vec![range(0, 10, 0.5), range(20, 30, 0.5)];

        for _ in 0..100 {
            let v = generate_weighted_int(&mut rng, &ranges)
                .unwrap()
                .as_i64()
                .unwrap();
            assert!((0..=10).contains(&v) || (20..=30).contains(&v));
        }
    }

    #[test]
    fn test_weighted_int_distribution() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = vec![range(0, 10, 0.9), range(11, 20, 0.1)];

        let low = (0..10_000)
            .filter(|_| {
                let v = generate_weighted_int(&mut rng, &ranges)
                    .unwrap()
                    .as_i64()
                    .unwrap();
                (0..=10).contains(&v)
            })
            .count();
        assert!(low >= 8_000, "only {low} of 10000 in the heavy range");
    }

    #[test]
    fn test_unnormalized_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = vec![range(0.0, 1.0, 8.0), range(10.0, 20.0, 2.0)];

        for _ in 0..100 {
            let v = generate_weighted_float(&mut rng, &ranges)
                .unwrap()
                .as_f64()
                .unwrap();
            assert!((0.0..=1.0).contains(&v) || (10.0..=20.0).contains(&v));
        }
    }

    #[test]
    fn test_overlapping_ranges_allowed() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = vec![range(0, 10, 1.0), range(5, 15, 1.0)];

        let mut overlap = 0;
        for _ in 0..2000 {
            let v = generate_weighted_int(&mut rng, &ranges)
                .unwrap()
                .as_i64()
                .unwrap();
            assert!((0..=15).contains(&v));
            if (5..=10).contains(&v) {
                overlap += 1;
            }
        }
        // Overlap covers 6 of 16 values but receives roughly half the mass
        assert!(overlap > 800, "overlap drawn {overlap} times");
    }
}
