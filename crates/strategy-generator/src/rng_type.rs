//! Random value types.
//!
//! [`RngType`] pairs one variant of the closed [`RngKind`] set with an
//! optional acceptance predicate. Constructors validate parameters up front
//! so that a malformed type fails at assembly time with
//! [`GenerationError::InvalidRange`], never in the middle of a run.

use crate::error::GenerationError;
use crate::generators::draw_value;
use crate::predicate::ValuePredicate;
use crate::seed::SeedSource;
use rand::Rng;
use serde::Serialize;
use strategy_core::{Value, ValueKind, DEFAULT_CHARSET};

/// Default per-argument retry ceiling for predicate filtering.
pub const DEFAULT_MAX_RETRIES: usize = 1000;

/// One weighted range of a weighted integer/float type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedRange<T> {
    /// Lower bound (inclusive)
    pub min: T,
    /// Upper bound (inclusive)
    pub max: T,
    /// Relative weight
    pub weight: f64,
}

/// The closed set of random value variants.
///
/// Serializes with a `variant` tag and the variant's parameters, which is
/// the descriptor used by metadata export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum RngKind {
    /// Uniform integer in `[min, max]`
    Integer { min: i64, max: i64 },

    /// Uniform float in `[min, max]`
    Float { min: f64, max: f64 },

    /// Bernoulli draw with probability `true_prob`
    Boolean { true_prob: f64 },

    /// String with uniform length and uniform characters
    String {
        min_len: usize,
        max_len: usize,
        charset: String,
    },

    /// Uniform pick from `items`
    Choice { items: Vec<Value> },

    /// Ordered items; uniform pick in random passes, full enumeration in
    /// exhaustive passes
    Sequence { items: Vec<Value> },

    /// Member names, uniform or weighted (weights aligned with members)
    Enum {
        members: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        weights: Option<Vec<f64>>,
    },

    /// Integer from a weighted set of ranges
    WeightedInteger { ranges: Vec<WeightedRange<i64>> },

    /// Float from a weighted set of ranges
    WeightedFloat { ranges: Vec<WeightedRange<f64>> },
}

impl RngKind {
    /// Variant name as exported.
    pub fn name(&self) -> &'static str {
        match self {
            RngKind::Integer { .. } => "integer",
            RngKind::Float { .. } => "float",
            RngKind::Boolean { .. } => "boolean",
            RngKind::String { .. } => "string",
            RngKind::Choice { .. } => "choice",
            RngKind::Sequence { .. } => "sequence",
            RngKind::Enum { .. } => "enum",
            RngKind::WeightedInteger { .. } => "weighted_integer",
            RngKind::WeightedFloat { .. } => "weighted_float",
        }
    }
}

/// A random value type with an optional acceptance predicate.
#[derive(Debug, Clone)]
pub struct RngType {
    kind: RngKind,
    predicate: Option<ValuePredicate>,
}

fn invalid(msg: impl Into<String>) -> GenerationError {
    GenerationError::InvalidRange(msg.into())
}

fn check_weights(weights: &[f64]) -> Result<(), GenerationError> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(invalid("weights must be finite and non-negative"));
    }
    // The sampler rescales by a factor just above 1, so leave headroom
    let total: f64 = weights.iter().sum();
    if !(total * 2.0).is_finite() || total <= 0.0 {
        return Err(invalid("weights must sum to a finite positive value"));
    }
    Ok(())
}

fn check_float_bounds(min: f64, max: f64) -> Result<(), GenerationError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(invalid(format!("float bounds must be finite, got [{min}, {max}]")));
    }
    if min > max {
        return Err(invalid(format!("min {min} is greater than max {max}")));
    }
    if !((max - min) * 2.0).is_finite() {
        return Err(invalid(format!("float range [{min}, {max}] is too wide to sample")));
    }
    Ok(())
}

impl RngType {
    fn from_kind(kind: RngKind) -> Self {
        Self {
            kind,
            predicate: None,
        }
    }

    /// Uniform integer in `[min, max]`.
    pub fn integer(min: i64, max: i64) -> Result<Self, GenerationError> {
        if min > max {
            return Err(invalid(format!("min {min} is greater than max {max}")));
        }
        Ok(Self::from_kind(RngKind::Integer { min, max }))
    }

    /// Uniform float in `[min, max]`.
    pub fn float(min: f64, max: f64) -> Result<Self, GenerationError> {
        check_float_bounds(min, max)?;
        Ok(Self::from_kind(RngKind::Float { min, max }))
    }

    /// Boolean that is `true` with probability `true_prob`.
    pub fn boolean(true_prob: f64) -> Result<Self, GenerationError> {
        if !(0.0..=1.0).contains(&true_prob) {
            return Err(invalid(format!(
                "true probability must be within [0, 1], got {true_prob}"
            )));
        }
        Ok(Self::from_kind(RngKind::Boolean { true_prob }))
    }

    /// String with length in `[min_len, max_len]` over `charset`.
    pub fn string(
        min_len: usize,
        max_len: usize,
        charset: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let charset = charset.into();
        if min_len > max_len {
            return Err(invalid(format!(
                "min length {min_len} is greater than max length {max_len}"
            )));
        }
        if charset.is_empty() {
            return Err(invalid("charset must not be empty"));
        }
        Ok(Self::from_kind(RngKind::String {
            min_len,
            max_len,
            charset,
        }))
    }

    /// Lowercase ASCII string of exactly `length` characters.
    pub fn string_of_length(length: usize) -> Result<Self, GenerationError> {
        Self::string(length, length, DEFAULT_CHARSET)
    }

    /// Uniform pick from `items`.
    pub fn choice(items: Vec<Value>) -> Result<Self, GenerationError> {
        if items.is_empty() {
            return Err(invalid("choice items must not be empty"));
        }
        Ok(Self::from_kind(RngKind::Choice { items }))
    }

    /// Ordered items for exhaustive enumeration.
    pub fn sequence(items: Vec<Value>) -> Result<Self, GenerationError> {
        if items.is_empty() {
            return Err(invalid("sequence cannot be empty"));
        }
        Ok(Self::from_kind(RngKind::Sequence { items }))
    }

    /// Uniform pick from enum member names.
    pub fn enumeration<S: Into<String>>(
        members: impl IntoIterator<Item = S>,
    ) -> Result<Self, GenerationError> {
        let members: Vec<String> = members.into_iter().map(Into::into).collect();
        if members.is_empty() {
            return Err(invalid("enum must have at least one member"));
        }
        Ok(Self::from_kind(RngKind::Enum {
            members,
            weights: None,
        }))
    }

    /// Weighted pick from enum member names.
    ///
    /// Members absent from `weights` get weight zero and are never drawn.
    /// Naming a member that does not exist is an error.
    pub fn weighted_enumeration<S: Into<String>, W: Into<String>>(
        members: impl IntoIterator<Item = S>,
        weights: impl IntoIterator<Item = (W, f64)>,
    ) -> Result<Self, GenerationError> {
        let members: Vec<String> = members.into_iter().map(Into::into).collect();
        if members.is_empty() {
            return Err(invalid("enum must have at least one member"));
        }

        let mut aligned = vec![0.0; members.len()];
        for (name, weight) in weights {
            let name = name.into();
            let idx = members
                .iter()
                .position(|m| *m == name)
                .ok_or_else(|| invalid(format!("'{name}' is not a member of the enum")))?;
            aligned[idx] = weight;
        }
        check_weights(&aligned)?;

        Ok(Self::from_kind(RngKind::Enum {
            members,
            weights: Some(aligned),
        }))
    }

    /// Integer from weighted inclusive ranges `((min, max), weight)`.
    pub fn weighted_integer(
        ranges: impl IntoIterator<Item = ((i64, i64), f64)>,
    ) -> Result<Self, GenerationError> {
        let ranges: Vec<WeightedRange<i64>> = ranges
            .into_iter()
            .map(|((min, max), weight)| WeightedRange { min, max, weight })
            .collect();
        if ranges.is_empty() {
            return Err(invalid("weighted ranges must not be empty"));
        }
        for r in &ranges {
            if r.min > r.max {
                return Err(invalid(format!(
                    "range ({}, {}) has min greater than max",
                    r.min, r.max
                )));
            }
        }
        check_weights(&ranges.iter().map(|r| r.weight).collect::<Vec<_>>())?;
        Ok(Self::from_kind(RngKind::WeightedInteger { ranges }))
    }

    /// Float from weighted inclusive ranges `((min, max), weight)`.
    pub fn weighted_float(
        ranges: impl IntoIterator<Item = ((f64, f64), f64)>,
    ) -> Result<Self, GenerationError> {
        let ranges: Vec<WeightedRange<f64>> = ranges
            .into_iter()
            .map(|((min, max), weight)| WeightedRange { min, max, weight })
            .collect();
        if ranges.is_empty() {
            return Err(invalid("weighted ranges must not be empty"));
        }
        for r in &ranges {
            check_float_bounds(r.min, r.max)?;
        }
        check_weights(&ranges.iter().map(|r| r.weight).collect::<Vec<_>>())?;
        Ok(Self::from_kind(RngKind::WeightedFloat { ranges }))
    }

    /// Attach an acceptance predicate.
    ///
    /// For sequences the predicate filters the item list immediately, so
    /// exhaustive enumeration only sees accepted items; filtering every item
    /// away is an error.
    pub fn with_predicate(mut self, predicate: ValuePredicate) -> Result<Self, GenerationError> {
        if let RngKind::Sequence { items } = &mut self.kind {
            items.retain(|item| predicate.test(item));
            if items.is_empty() {
                return Err(invalid("all sequence items were filtered by predicate"));
            }
        }
        self.predicate = Some(predicate);
        Ok(self)
    }

    /// The variant and its parameters.
    pub fn kind(&self) -> &RngKind {
        &self.kind
    }

    /// The attached predicate, if any.
    pub fn predicate(&self) -> Option<&ValuePredicate> {
        self.predicate.as_ref()
    }

    /// Kind tag of the values this type produces.
    pub fn value_kind(&self) -> ValueKind {
        match &self.kind {
            RngKind::Integer { .. } | RngKind::WeightedInteger { .. } => ValueKind::Int,
            RngKind::Float { .. } | RngKind::WeightedFloat { .. } => ValueKind::Float,
            RngKind::Boolean { .. } => ValueKind::Bool,
            RngKind::String { .. } => ValueKind::String,
            RngKind::Enum { .. } => ValueKind::Enum,
            RngKind::Choice { items } | RngKind::Sequence { items } => {
                let kinds: Vec<ValueKind> = items.iter().map(Value::kind).collect();
                ValueKind::unify(&kinds)
            }
        }
    }

    /// Whether this is a sequence type.
    pub fn is_sequence(&self) -> bool {
        matches!(self.kind, RngKind::Sequence { .. })
    }

    /// The ordered item list of a sequence type.
    pub fn sequence_items(&self) -> Option<&[Value]> {
        match &self.kind {
            RngKind::Sequence { items } => Some(items),
            _ => None,
        }
    }

    /// Draw one value without applying the predicate.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Result<Value, GenerationError> {
        draw_value(&self.kind, rng)
    }

    /// Draw one value and test it: `None` means the predicate rejected it.
    pub fn draw_filtered<R: Rng>(&self, rng: &mut R) -> Result<Option<Value>, GenerationError> {
        let value = self.draw(rng)?;
        match &self.predicate {
            Some(p) if !p.test(&value) => Ok(None),
            _ => Ok(Some(value)),
        }
    }

    /// Draw a value that satisfies the predicate, retrying up to
    /// `max_retries` draws.
    pub fn generate(
        &self,
        source: &mut SeedSource,
        argument: &str,
        max_retries: usize,
    ) -> Result<Value, GenerationError> {
        let attempts = max_retries.max(1);
        for _ in 0..attempts {
            if let Some(value) = self.draw_filtered(source.rng())? {
                return Ok(value);
            }
        }
        Err(GenerationError::GenerationExhausted {
            argument: argument.to_string(),
            attempts,
        })
    }
}
