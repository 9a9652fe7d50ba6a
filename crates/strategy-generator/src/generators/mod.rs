//! Draw logic for each random type variant.
//!
//! This module maps an [`RngKind`] to the function that draws one raw value
//! from it. Predicates are not applied here; see [`crate::rng_type`].

pub mod choice;
pub mod numeric;
pub mod string;
pub mod weighted;

use crate::error::GenerationError;
use crate::rng_type::RngKind;
use rand::Rng;
use strategy_core::Value;

/// Draw one unfiltered value from the given variant.
///
/// Sequences draw like choices; exhaustive enumeration reads their items
/// directly instead of calling this.
pub fn draw_value<R: Rng>(kind: &RngKind, rng: &mut R) -> Result<Value, GenerationError> {
    match kind {
        RngKind::Integer { min, max } => Ok(numeric::generate_int_range(rng, *min, *max)),

        RngKind::Float { min, max } => Ok(numeric::generate_float_range(rng, *min, *max)),

        RngKind::Boolean { true_prob } => Ok(numeric::generate_weighted_bool(rng, *true_prob)),

        RngKind::String {
            min_len,
            max_len,
            charset,
        } => string::generate_string(rng, *min_len, *max_len, charset),

        RngKind::Choice { items } | RngKind::Sequence { items } => {
            choice::generate_choice(rng, items)
        }

        RngKind::Enum { members, weights } => choice::generate_enum(rng, members, weights.as_deref()),

        RngKind::WeightedInteger { ranges } => weighted::generate_weighted_int(rng, ranges),

        RngKind::WeightedFloat { ranges } => weighted::generate_weighted_float(rng, ranges),
    }
}
