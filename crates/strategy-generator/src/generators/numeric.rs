//! Numeric value generators.

use rand::Rng;
use strategy_core::Value;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> Value {
    Value::Int(rng.gen_range(min..=max))
}

/// Generate a random float in the given range (inclusive).
pub fn generate_float_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> Value {
    Value::Float(rng.gen_range(min..=max))
}

/// Generate a boolean that is `true` with probability `true_prob`.
pub fn generate_weighted_bool<R: Rng>(rng: &mut R, true_prob: f64) -> Value {
    Value::Bool(rng.gen_bool(true_prob))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_int_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_int_range(&mut rng, 10, 20);
            if let Value::Int(v) = value {
                assert!((10..=20).contains(&v));
            } else {
                panic!("Expected Int value");
            }
        }
    }

    #[test]
    fn test_generate_int_single_value_range() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_int_range(&mut rng, 5, 5), Value::Int(5));
    }

    #[test]
    fn test_generate_float_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_float_range(&mut rng, -1.5, 100.0);
            if let Value::Float(v) = value {
                assert!((-1.5..=100.0).contains(&v));
            } else {
                panic!("Expected Float value");
            }
        }
    }

    #[test]
    fn test_weighted_bool_extremes() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            assert_eq!(generate_weighted_bool(&mut rng, 1.0), Value::Bool(true));
            assert_eq!(generate_weighted_bool(&mut rng, 0.0), Value::Bool(false));
        }
    }

    #[test]
    fn test_weighted_bool_distribution() {
        let mut rng = StdRng::seed_from_u64(42);

        let trues = (0..1000)
            .filter(|_| generate_weighted_bool(&mut rng, 0.8) == Value::Bool(true))
            .count();
        assert!((700..=900).contains(&trues), "got {trues} trues");
    }
}
