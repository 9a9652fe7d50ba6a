//! Random string generator.

use crate::error::GenerationError;
use rand::seq::SliceRandom;
use rand::Rng;
use strategy_core::Value;

/// Generate a string whose length is uniform in `[min_len, max_len]` and
/// whose characters are uniform over `charset`.
pub fn generate_string<R: Rng>(
    rng: &mut R,
    min_len: usize,
    max_len: usize,
    charset: &str,
) -> Result<Value, GenerationError> {
    let chars: Vec<char> = charset.chars().collect();
    let length = rng.gen_range(min_len..=max_len);

    let mut out = String::with_capacity(length);
    for _ in 0..length {
        let c = chars
            .choose(rng)
            .ok_or_else(|| GenerationError::InvalidRange("charset must not be empty".into()))?;
        out.push(*c);
    }

    Ok(Value::String(out))
}
