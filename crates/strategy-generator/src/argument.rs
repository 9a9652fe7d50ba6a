//! Test arguments.
//!
//! An [`Argument`] binds a name to one of three generation modes:
//!
//! - **Static**: a fixed literal, returned unconditionally
//! - **Random**: draws from an [`RngType`]
//! - **Mixed**: draws from an [`RngType`] in random passes, and emits a list
//!   of trusted directed literals in directed passes
//!
//! Random draws are filtered first by the type's own predicate and then by
//! the argument's validator, under a single bounded retry budget.

use crate::error::GenerationError;
use crate::predicate::ValuePredicate;
use crate::rng_type::{RngType, DEFAULT_MAX_RETRIES};
use crate::seed::SeedSource;
use strategy_core::{Value, ValueKind};

/// How an argument produces values.
#[derive(Debug, Clone)]
pub enum ArgumentMode {
    /// Fixed literal
    Static(Value),
    /// Random draw
    Random(RngType),
    /// Random draw plus directed literals
    Mixed {
        rng_type: RngType,
        directed: Vec<Value>,
    },
}

/// A named test argument.
#[derive(Debug, Clone)]
pub struct Argument {
    name: String,
    description: String,
    mode: ArgumentMode,
    validator: Option<ValuePredicate>,
    max_retries: usize,
}

impl Argument {
    fn with_mode(name: impl Into<String>, mode: ArgumentMode) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            mode,
            validator: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Argument with a fixed literal value.
    pub fn fixed(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_mode(name, ArgumentMode::Static(value.into()))
    }

    /// Argument drawn from `rng_type`.
    pub fn random(name: impl Into<String>, rng_type: RngType) -> Self {
        Self::with_mode(name, ArgumentMode::Random(rng_type))
    }

    /// Argument drawn from `rng_type`, with directed literals.
    pub fn mixed(name: impl Into<String>, rng_type: RngType, directed: Vec<Value>) -> Self {
        Self::with_mode(name, ArgumentMode::Mixed { rng_type, directed })
    }

    /// Set the human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a validator applied after the type's own predicate.
    pub fn with_validator(mut self, validator: ValuePredicate) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Override the per-argument retry ceiling.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn mode(&self) -> &ArgumentMode {
        &self.mode
    }

    pub fn validator(&self) -> Option<&ValuePredicate> {
        self.validator.as_ref()
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// The random type, for Random and Mixed arguments.
    pub fn rng_type(&self) -> Option<&RngType> {
        match &self.mode {
            ArgumentMode::Static(_) => None,
            ArgumentMode::Random(rng_type) | ArgumentMode::Mixed { rng_type, .. } => {
                Some(rng_type)
            }
        }
    }

    /// The static literal, for Static arguments.
    pub fn static_value(&self) -> Option<&Value> {
        match &self.mode {
            ArgumentMode::Static(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self.mode, ArgumentMode::Static(_))
    }

    pub fn has_directed_values(&self) -> bool {
        !self.directed_values().is_empty()
    }

    /// Literals emitted in a directed pass: once each, in order, unfiltered.
    pub fn directed_values(&self) -> &[Value] {
        match &self.mode {
            ArgumentMode::Mixed { directed, .. } => directed,
            _ => &[],
        }
    }

    /// Whether this argument takes part in exhaustive enumeration.
    pub fn is_sequence(&self) -> bool {
        self.rng_type().is_some_and(RngType::is_sequence)
    }

    /// Kind tag of the values this argument produces.
    pub fn value_kind(&self) -> ValueKind {
        match &self.mode {
            ArgumentMode::Static(value) => value.kind(),
            ArgumentMode::Random(rng_type) => rng_type.value_kind(),
            ArgumentMode::Mixed { rng_type, directed } => {
                let mut kinds: Vec<ValueKind> = directed.iter().map(Value::kind).collect();
                kinds.push(rng_type.value_kind());
                ValueKind::unify(&kinds)
            }
        }
    }

    /// Generate a single value.
    ///
    /// Static arguments return their literal. Random and Mixed arguments
    /// draw until both the type's predicate and the validator accept, or
    /// fail with [`GenerationError::GenerationExhausted`] after
    /// `max_retries` draws.
    pub fn generate(&self, source: &mut SeedSource) -> Result<Value, GenerationError> {
        let rng_type = match &self.mode {
            ArgumentMode::Static(value) => return Ok(value.clone()),
            ArgumentMode::Random(rng_type) | ArgumentMode::Mixed { rng_type, .. } => rng_type,
        };

        let attempts = self.max_retries.max(1);
        for _ in 0..attempts {
            let Some(value) = rng_type.draw_filtered(source.rng())? else {
                continue;
            };
            match &self.validator {
                Some(validator) if !validator.test(&value) => continue,
                _ => return Ok(value),
            }
        }

        Err(GenerationError::GenerationExhausted {
            argument: self.name.clone(),
            attempts,
        })
    }

    /// Generate `n` samples, preceded by the directed literals.
    ///
    /// A Static argument yields its literal once regardless of `n`.
    pub fn generate_samples(
        &self,
        n: usize,
        source: &mut SeedSource,
    ) -> Result<Vec<Value>, GenerationError> {
        if let ArgumentMode::Static(value) = &self.mode {
            return Ok(vec![value.clone()]);
        }

        let mut samples = self.directed_values().to_vec();
        samples.reserve(n);
        for _ in 0..n {
            samples.push(self.generate(source)?);
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_argument() {
        let arg = Argument::fixed("count", 0).with_description("Edge case: zero");
        let mut source = SeedSource::from_seed(42);

        assert!(arg.is_static());
        assert_eq!(arg.description(), "Edge case: zero");
        assert_eq!(arg.generate(&mut source).unwrap(), Value::Int(0));
        assert_eq!(
            arg.generate_samples(10, &mut source).unwrap(),
            vec![Value::Int(0)]
        );
        assert_eq!(arg.value_kind(), ValueKind::Int);
    }

    #[test]
    fn test_static_ignores_validator() {
        let arg = Argument::fixed("count", -1)
            .with_validator(ValuePredicate::new(|v| v.as_i64().is_some_and(|i| i >= 0)));
        let mut source = SeedSource::from_seed(42);
        assert_eq!(arg.generate(&mut source).unwrap(), Value::Int(-1));
    }

    #[test]
    fn test_random_argument_in_range() {
        let arg = Argument::random("count", RngType::integer(1, 100).unwrap());
        let mut source = SeedSource::from_seed(42);

        let samples = arg.generate_samples(5, &mut source).unwrap();
        assert_eq!(samples.len(), 5);
        for s in samples {
            assert!((1..=100).contains(&s.as_i64().unwrap()));
        }
    }

    #[test]
    fn test_mixed_directed_first() {
        let arg = Argument::mixed(
            "count",
            RngType::integer(1, 100).unwrap(),
            strategy_core::tuple![0, 1, 99, 100],
        );
        let mut source = SeedSource::from_seed(42);

        assert!(arg.has_directed_values());
        let samples = arg.generate_samples(10, &mut source).unwrap();
        assert_eq!(samples.len(), 14);
        assert_eq!(&samples[..4], &strategy_core::tuple![0, 1, 99, 100][..]);
    }

    #[test]
    fn test_directed_literals_not_filtered() {
        let positive = ValuePredicate::new(|v| v.as_i64().is_some_and(|i| i > 0));
        let arg = Argument::mixed(
            "count",
            RngType::integer(1, 10).unwrap(),
            strategy_core::tuple![-5],
        )
        .with_validator(positive);
        let mut source = SeedSource::from_seed(42);

        let samples = arg.generate_samples(3, &mut source).unwrap();
        assert_eq!(samples[0], Value::Int(-5));
        assert!(samples[1..].iter().all(|v| v.as_i64().unwrap() > 0));
    }

    #[test]
    fn test_validator_layered_after_predicate() {
        let even = ValuePredicate::new(|v| v.as_i64().is_some_and(|i| i % 2 == 0));
        let big = ValuePredicate::new(|v| v.as_i64().is_some_and(|i| i > 50));
        let arg = Argument::random(
            "n",
            RngType::integer(0, 100).unwrap().with_predicate(even).unwrap(),
        )
        .with_validator(big);
        let mut source = SeedSource::from_seed(42);

        for _ in 0..50 {
            let v = arg.generate(&mut source).unwrap().as_i64().unwrap();
            assert!(v % 2 == 0 && v > 50, "got {v}");
        }
    }

    #[test]
    fn test_validator_exhaustion_names_argument() {
        let arg = Argument::random("positive", RngType::integer(-10, -1).unwrap())
            .with_validator(ValuePredicate::new(|v| v.as_i64().is_some_and(|i| i > 0)))
            .with_max_retries(30);
        let mut source = SeedSource::from_seed(42);

        match arg.generate(&mut source) {
            Err(GenerationError::GenerationExhausted { argument, attempts }) => {
                assert_eq!(argument, "positive");
                assert_eq!(attempts, 30);
            }
            other => panic!("Expected GenerationExhausted, got {other:?}"),
        }
    }

    #[test]
    fn test_sequence_detection() {
        let seq = Argument::random("s", RngType::sequence(strategy_core::tuple![1, 2]).unwrap());
        let rnd = Argument::random("r", RngType::integer(0, 1).unwrap());
        assert!(seq.is_sequence());
        assert!(!rnd.is_sequence());
        assert!(!Argument::fixed("f", 1).is_sequence());
    }
}
