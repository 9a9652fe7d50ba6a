//! Uniform and weighted selection from item lists.

use crate::error::GenerationError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use strategy_core::Value;

/// Pick an index by cumulative weight.
pub fn weighted_index<R: Rng>(rng: &mut R, weights: &[f64]) -> Result<usize, GenerationError> {
    let dist: WeightedIndex<f64> = WeightedIndex::new(weights.iter().copied())
        .map_err(|e| GenerationError::InvalidRange(format!("invalid weights: {e}")))?;
    Ok(dist.sample(rng))
}

/// Pick one item uniformly.
pub fn generate_choice<R: Rng>(rng: &mut R, items: &[Value]) -> Result<Value, GenerationError> {
    items
        .choose(rng)
        .cloned()
        .ok_or_else(|| GenerationError::InvalidRange("item list must not be empty".into()))
}

/// Pick one enum member, uniformly or by weight.
pub fn generate_enum<R: Rng>(
    rng: &mut R,
    members: &[String],
    weights: Option<&[f64]>,
) -> Result<Value, GenerationError> {
    let idx = match weights {
        Some(weights) => weighted_index(rng, weights)?,
        None if members.is_empty() => {
            return Err(GenerationError::InvalidRange(
                "enum must have at least one member".into(),
            ))
        }
        None => rng.gen_range(0..members.len()),
    };

    members
        .get(idx)
        .map(|m| Value::String(m.clone()))
        .ok_or_else(|| GenerationError::InvalidRange("enum weights do not match members".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_choice_all_items_possible() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = vec![Value::Int(1), Value::Int(2), Value::Int(3)];

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let v = generate_choice(&mut rng, &items).unwrap();
            seen.insert(v.as_i64().unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_choice_empty_errors() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(generate_choice(&mut rng, &[]).is_err());
    }

    #[test]
    fn test_weighted_enum_skips_zero_weight() {
        let mut rng = StdRng::seed_from_u64(42);
        let members: Vec<String> = ["PENDING", "SUCCESS", "FAILED"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let weights = [0.0, 0.9, 0.1];

        let mut success = 0;
        for _ in 0..100 {
            let v = generate_enum(&mut rng, &members, Some(&weights)).unwrap();
            assert_ne!(v, Value::from("PENDING"));
            if v == Value::from("SUCCESS") {
                success += 1;
            }
        }
        assert!(success > 70, "SUCCESS drawn {success} times");
    }

    #[test]
    fn test_uniform_enum() {
        let mut rng = StdRng::seed_from_u64(42);
        let members = vec!["A".to_string(), "B".to_string()];
        for _ in 0..20 {
            let v = generate_enum(&mut rng, &members, None).unwrap();
            assert!(v == Value::from("A") || v == Value::from("B"));
        }
    }
}
