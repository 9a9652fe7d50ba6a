//! Parameter vectors: ordered arguments plus named tuples and constraints.
//!
//! A [`Vector`] is assembled once and then used for any number of
//! generation passes; generation never mutates it. A pass combines up to
//! three tuple sources, selected by [`GenerationMode`]:
//!
//! ```text
//!   directed tuples ──┐   (insertion order, constraints not applied)
//!                     ├──► ordered output
//!   random tuples ────┘   (n draws, or the exhaustive sequence product,
//!                          redrawn whole until every constraint passes)
//!
//!   test tuples ─────────► output in `test` mode only
//! ```

use crate::argument::Argument;
use crate::error::GenerationError;
use crate::mode::{GenerationMode, SampleCount};
use crate::predicate::VectorConstraint;
use crate::seed::SeedSource;
use serde::Serialize;
use std::collections::HashSet;
use strategy_core::Value;

/// Default vector-level retry ceiling for constraint satisfaction.
pub const DEFAULT_MAX_VECTOR_RETRIES: usize = 1000;

const DIRECTED: &str = "Directed";
const TEST: &str = "Test";

/// A named literal tuple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedVector {
    pub name: String,
    pub values: Vec<Value>,
}

/// A generated tuple, carrying its name when it came from a named
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledVector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub values: Vec<Value>,
}

/// Result of a generation pass: argument names and value tuples, both in
/// argument order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedVectors {
    pub arg_names: Vec<String>,
    pub vectors: Vec<Vec<Value>>,
}

/// Ordered arguments with directed/test tuples and constraints.
#[derive(Debug, Clone)]
pub struct Vector {
    arguments: Vec<Argument>,
    directed: Vec<NamedVector>,
    tests: Vec<NamedVector>,
    constraints: Vec<VectorConstraint>,
    always_include_directed: bool,
    max_vector_retries: usize,
}

fn upsert(collection: &mut Vec<NamedVector>, name: String, values: Vec<Value>) {
    match collection.iter_mut().find(|v| v.name == name) {
        Some(existing) => existing.values = values,
        None => collection.push(NamedVector { name, values }),
    }
}

fn find<'a>(
    collection: &'a [NamedVector],
    kind: &'static str,
    name: &str,
) -> Result<&'a NamedVector, GenerationError> {
    collection.iter().find(|v| v.name == name).ok_or_else(|| {
        GenerationError::unknown_name(kind, name, collection.iter().map(|v| v.name.as_str()))
    })
}

fn at<'a>(
    collection: &'a [NamedVector],
    kind: &'static str,
    index: usize,
) -> Result<&'a NamedVector, GenerationError> {
    collection
        .get(index)
        .ok_or(GenerationError::IndexOutOfRange {
            collection: kind,
            index,
            len: collection.len(),
        })
}

impl Vector {
    /// Create a vector over `arguments`. Argument names must be unique.
    pub fn new(arguments: Vec<Argument>) -> Result<Self, GenerationError> {
        let mut seen = HashSet::new();
        for arg in &arguments {
            if !seen.insert(arg.name()) {
                return Err(GenerationError::DuplicateName(arg.name().to_string()));
            }
        }

        Ok(Self {
            arguments,
            directed: Vec::new(),
            tests: Vec::new(),
            constraints: Vec::new(),
            always_include_directed: true,
            max_vector_retries: DEFAULT_MAX_VECTOR_RETRIES,
        })
    }

    /// Builder form of [`add_directed_vector`](Self::add_directed_vector).
    pub fn with_directed_vector(
        mut self,
        name: impl Into<String>,
        values: Vec<Value>,
    ) -> Result<Self, GenerationError> {
        self.add_directed_vector(name, values)?;
        Ok(self)
    }

    /// Builder form of [`add_test_vector`](Self::add_test_vector).
    pub fn with_test_vector(
        mut self,
        name: impl Into<String>,
        values: Vec<Value>,
    ) -> Result<Self, GenerationError> {
        self.add_test_vector(name, values)?;
        Ok(self)
    }

    /// Builder form of [`add_constraint`](Self::add_constraint).
    pub fn with_constraint(mut self, constraint: VectorConstraint) -> Self {
        self.add_constraint(constraint);
        self
    }

    /// Whether `mixed` mode emits directed tuples (default `true`).
    pub fn with_always_include_directed(mut self, always: bool) -> Self {
        self.always_include_directed = always;
        self
    }

    /// Override the vector-level retry ceiling.
    pub fn with_max_vector_retries(mut self, max_retries: usize) -> Self {
        self.max_vector_retries = max_retries;
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Get an argument by name.
    pub fn argument(&self, name: &str) -> Result<&Argument, GenerationError> {
        self.arguments.iter().find(|a| a.name() == name).ok_or_else(|| {
            GenerationError::unknown_name("argument", name, self.arguments.iter().map(Argument::name))
        })
    }

    /// Argument names in declared order.
    pub fn arg_names(&self) -> Vec<String> {
        self.arguments.iter().map(|a| a.name().to_string()).collect()
    }

    pub fn num_args(&self) -> usize {
        self.arguments.len()
    }

    pub fn always_include_directed(&self) -> bool {
        self.always_include_directed
    }

    pub fn max_vector_retries(&self) -> usize {
        self.max_vector_retries
    }

    // ========================================================================
    // Directed and Test Vectors
    // ========================================================================

    fn check_arity(
        &self,
        collection: &'static str,
        name: &str,
        values: &[Value],
    ) -> Result<(), GenerationError> {
        if values.len() != self.arguments.len() {
            return Err(GenerationError::ArityMismatch {
                collection,
                name: name.to_string(),
                expected: self.arguments.len(),
                actual: values.len(),
            });
        }
        Ok(())
    }

    /// Register a directed tuple. Re-using a name replaces its values in
    /// place.
    pub fn add_directed_vector(
        &mut self,
        name: impl Into<String>,
        values: Vec<Value>,
    ) -> Result<(), GenerationError> {
        let name = name.into();
        self.check_arity(DIRECTED, &name, &values)?;
        upsert(&mut self.directed, name, values);
        Ok(())
    }

    /// Remove a directed tuple by name.
    pub fn remove_directed_vector(&mut self, name: &str) -> Result<NamedVector, GenerationError> {
        let idx = self
            .directed
            .iter()
            .position(|v| v.name == name)
            .ok_or_else(|| {
                GenerationError::unknown_name(
                    "directed vector",
                    name,
                    self.directed.iter().map(|v| v.name.as_str()),
                )
            })?;
        Ok(self.directed.remove(idx))
    }

    /// Get a directed tuple by name.
    pub fn directed_vector(&self, name: &str) -> Result<&[Value], GenerationError> {
        find(&self.directed, "directed vector", name).map(|v| v.values.as_slice())
    }

    /// Get a directed tuple by registration index.
    pub fn directed_vector_at(&self, index: usize) -> Result<&NamedVector, GenerationError> {
        at(&self.directed, "directed vector", index)
    }

    pub fn directed_vectors(&self) -> &[NamedVector] {
        &self.directed
    }

    pub fn directed_vector_names(&self) -> Vec<&str> {
        self.directed.iter().map(|v| v.name.as_str()).collect()
    }

    /// Register a test tuple. Re-using a name replaces its values in place.
    pub fn add_test_vector(
        &mut self,
        name: impl Into<String>,
        values: Vec<Value>,
    ) -> Result<(), GenerationError> {
        let name = name.into();
        self.check_arity(TEST, &name, &values)?;
        upsert(&mut self.tests, name, values);
        Ok(())
    }

    /// Remove a test tuple by name.
    pub fn remove_test_vector(&mut self, name: &str) -> Result<NamedVector, GenerationError> {
        let idx = self
            .tests
            .iter()
            .position(|v| v.name == name)
            .ok_or_else(|| {
                GenerationError::unknown_name(
                    "test vector",
                    name,
                    self.tests.iter().map(|v| v.name.as_str()),
                )
            })?;
        Ok(self.tests.remove(idx))
    }

    /// Get a test tuple by name.
    pub fn test_vector(&self, name: &str) -> Result<&[Value], GenerationError> {
        find(&self.tests, "test vector", name).map(|v| v.values.as_slice())
    }

    /// Get a test tuple by registration index.
    pub fn test_vector_at(&self, index: usize) -> Result<&NamedVector, GenerationError> {
        at(&self.tests, "test vector", index)
    }

    pub fn test_vectors(&self) -> &[NamedVector] {
        &self.tests
    }

    pub fn test_vector_names(&self) -> Vec<&str> {
        self.tests.iter().map(|v| v.name.as_str()).collect()
    }

    // ========================================================================
    // Constraints
    // ========================================================================

    pub fn add_constraint(&mut self, constraint: VectorConstraint) {
        self.constraints.push(constraint);
    }

    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
    }

    pub fn constraints(&self) -> &[VectorConstraint] {
        &self.constraints
    }

    fn failing_constraint(&self, tuple: &[Value]) -> Option<usize> {
        self.constraints.iter().position(|c| !c.test(tuple))
    }

    fn constraint_label(&self, index: usize) -> String {
        self.constraints
            .get(index)
            .map(|c| c.label("constraint", index))
            .unwrap_or_else(|| format!("constraint #{index}"))
    }

    /// Draw whole tuples with `draw` until every constraint accepts one.
    fn draw_constrained<F>(
        &self,
        source: &mut SeedSource,
        mut draw: F,
    ) -> Result<Vec<Value>, GenerationError>
    where
        F: FnMut(&mut SeedSource) -> Result<Vec<Value>, GenerationError>,
    {
        let attempts = self.max_vector_retries.max(1);
        let mut last_failure = 0;

        for attempt in 1..=attempts {
            let tuple = draw(source)?;
            match self.failing_constraint(&tuple) {
                None => {
                    if attempt > 1 {
                        let constraint = self.constraint_label(last_failure);
                        tracing::debug!(
                            attempts = attempt,
                            constraint = %constraint,
                            "Constraints satisfied after retries"
                        );
                        if attempt > attempts / 2 {
                            tracing::warn!(
                                attempts = attempt,
                                max_retries = attempts,
                                constraint = %constraint,
                                "Constraint rejected over half of the retry budget"
                            );
                        }
                    }
                    return Ok(tuple);
                }
                Some(idx) => last_failure = idx,
            }
        }

        let constraint = self.constraint_label(last_failure);
        tracing::warn!(
            constraint = %constraint,
            attempts,
            "Vector constraint could not be satisfied"
        );
        Err(GenerationError::ConstraintExhausted {
            constraint,
            attempts,
        })
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Generate one random tuple that satisfies every constraint.
    ///
    /// Each argument is drawn independently in declared order; a tuple that
    /// fails any constraint is discarded and redrawn whole.
    pub fn generate_vector(&self, source: &mut SeedSource) -> Result<Vec<Value>, GenerationError> {
        self.draw_constrained(source, |source| {
            self.arguments
                .iter()
                .map(|arg| arg.generate(source))
                .collect()
        })
    }

    /// Enumerate the Cartesian product of the sequence arguments.
    ///
    /// Combinations are produced in declared argument order with the
    /// leftmost sequence varying slowest. When non-sequence arguments exist,
    /// each combination gets its own freshly drawn values for them, redrawn
    /// until the constraints pass. Pure-sequence vectors have nothing to
    /// redraw, so combinations rejected by a constraint are dropped.
    pub fn generate_exhaustive(
        &self,
        source: &mut SeedSource,
    ) -> Result<Vec<Vec<Value>>, GenerationError> {
        let sequences: Vec<Option<&[Value]>> = self
            .arguments
            .iter()
            .map(|arg| arg.rng_type().and_then(|t| t.sequence_items()))
            .collect();
        let seq_positions: Vec<usize> = sequences
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|_| i))
            .collect();

        if seq_positions.is_empty() {
            return Err(GenerationError::NoSequenceArguments);
        }
        let has_random = seq_positions.len() < self.arguments.len();

        let total = seq_positions
            .iter()
            .filter_map(|&i| sequences[i].map(<[Value]>::len))
            .try_fold(1usize, usize::checked_mul)
            .ok_or_else(|| {
                GenerationError::InvalidRange("sequence product is too large to enumerate".into())
            })?;

        let mut out = Vec::with_capacity(total);
        let mut indices = vec![0usize; self.arguments.len()];
        let mut dropped = 0usize;

        for _ in 0..total {
            let combination = |i: usize| sequences[i].map(|items| items[indices[i]].clone());

            if has_random {
                let tuple = self.draw_constrained(source, |source| {
                    self.arguments
                        .iter()
                        .enumerate()
                        .map(|(i, arg)| match combination(i) {
                            Some(value) => Ok(value),
                            None => arg.generate(source),
                        })
                        .collect()
                })?;
                out.push(tuple);
            } else {
                let tuple: Vec<Value> = (0..self.arguments.len())
                    .filter_map(combination)
                    .collect();
                match self.failing_constraint(&tuple) {
                    None => out.push(tuple),
                    Some(_) => dropped += 1,
                }
            }

            // Advance the odometer: rightmost sequence varies fastest
            for &pos in seq_positions.iter().rev() {
                let len = sequences[pos].map_or(1, <[Value]>::len);
                indices[pos] += 1;
                if indices[pos] < len {
                    break;
                }
                indices[pos] = 0;
            }
        }

        tracing::debug!(
            combinations = total,
            emitted = out.len(),
            dropped,
            "Exhaustive expansion complete"
        );
        Ok(out)
    }

    /// Generate tuples for `mode`, keeping directed/test tuple names.
    ///
    /// In `all` mode directed tuples come first, followed by random or
    /// exhaustive tuples. Directed and test tuples are emitted verbatim;
    /// constraints only govern drawn tuples.
    pub fn generate_labeled(
        &self,
        count: SampleCount,
        mode: GenerationMode,
        source: &mut SeedSource,
    ) -> Result<Vec<LabeledVector>, GenerationError> {
        let named = |v: &NamedVector| LabeledVector {
            name: Some(v.name.clone()),
            values: v.values.clone(),
        };

        if mode == GenerationMode::Test {
            return Ok(self.tests.iter().map(named).collect());
        }

        let mut out = Vec::new();

        if mode.includes_directed(self.always_include_directed) {
            out.extend(self.directed.iter().map(named));
        }

        if mode.includes_random(self.always_include_directed) {
            let drawn = match count {
                SampleCount::Count(n) => (0..n)
                    .map(|_| self.generate_vector(source))
                    .collect::<Result<Vec<_>, _>>()?,
                SampleCount::Exhaustive => self.generate_exhaustive(source)?,
            };
            out.extend(drawn.into_iter().map(|values| LabeledVector { name: None, values }));
        }

        tracing::debug!(
            mode = %mode,
            count = %count,
            vectors = out.len(),
            "Generated vectors"
        );
        Ok(out)
    }

    /// Generate value tuples for `mode`.
    pub fn generate(
        &self,
        count: SampleCount,
        mode: GenerationMode,
        source: &mut SeedSource,
    ) -> Result<Vec<Vec<Value>>, GenerationError> {
        Ok(self
            .generate_labeled(count, mode, source)?
            .into_iter()
            .map(|v| v.values)
            .collect())
    }

    /// Generate argument names plus value tuples.
    pub fn generate_vectors(
        &self,
        count: SampleCount,
        mode: GenerationMode,
        source: &mut SeedSource,
    ) -> Result<GeneratedVectors, GenerationError> {
        Ok(GeneratedVectors {
            arg_names: self.arg_names(),
            vectors: self.generate(count, mode, source)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng_type::RngType;
    use strategy_core::tuple;

    fn xy_vector() -> Vector {
        Vector::new(vec![
            Argument::random("x", RngType::integer(0, 10).unwrap()),
            Argument::random("y", RngType::integer(0, 10).unwrap()),
        ])
        .unwrap()
    }

    fn less_than() -> VectorConstraint {
        VectorConstraint::described("x < y", |v: &[Value]| v[0] < v[1])
    }

    #[test]
    fn test_duplicate_argument_names() {
        let err = Vector::new(vec![
            Argument::fixed("a", 1),
            Argument::fixed("a", 2),
        ])
        .unwrap_err();
        assert_eq!(err, GenerationError::DuplicateName("a".to_string()));
    }

    #[test]
    fn test_arity_checked_at_registration() {
        let mut vector = xy_vector();
        let err = vector.add_directed_vector("bad", tuple![5]).unwrap_err();
        assert_eq!(
            err,
            GenerationError::ArityMismatch {
                collection: "Directed",
                name: "bad".to_string(),
                expected: 2,
                actual: 1,
            }
        );
        assert!(vector.add_test_vector("bad", tuple![1, 2, 3]).is_err());
        assert!(vector.directed_vectors().is_empty());
    }

    #[test]
    fn test_directed_scenario_with_constraint() {
        let vector = xy_vector()
            .with_constraint(less_than())
            .with_directed_vector("eq", tuple![5, 5])
            .unwrap();
        let mut source = SeedSource::from_seed(42);

        let out = vector
            .generate(SampleCount::Count(5), GenerationMode::All, &mut source)
            .unwrap();

        assert_eq!(out.len(), 6);
        assert_eq!(out[0], tuple![5, 5]);
        for t in &out[1..] {
            assert!(t[0] < t[1], "constraint violated: {t:?}");
        }
    }

    #[test]
    fn test_directed_only_preserves_order() {
        let vector = xy_vector()
            .with_directed_vector("origin", tuple![0, 0])
            .unwrap()
            .with_directed_vector("max", tuple![10, 10])
            .unwrap()
            .with_directed_vector("mid", tuple![5, 5])
            .unwrap();
        let mut source = SeedSource::from_seed(42);

        let out = vector
            .generate(SampleCount::Count(100), GenerationMode::DirectedOnly, &mut source)
            .unwrap();
        assert_eq!(out, vec![tuple![0, 0], tuple![10, 10], tuple![5, 5]]);
    }

    #[test]
    fn test_reregistering_name_replaces_in_place() {
        let mut vector = xy_vector();
        vector.add_directed_vector("a", tuple![1, 1]).unwrap();
        vector.add_directed_vector("b", tuple![2, 2]).unwrap();
        vector.add_directed_vector("a", tuple![3, 3]).unwrap();

        assert_eq!(vector.directed_vector_names(), vec!["a", "b"]);
        assert_eq!(vector.directed_vector("a").unwrap(), &tuple![3, 3][..]);
    }

    #[test]
    fn test_mixed_mode_respects_flag() {
        let mut source = SeedSource::from_seed(42);

        let including = xy_vector()
            .with_directed_vector("zero", tuple![0, 0])
            .unwrap();
        let out = including
            .generate(SampleCount::Count(3), GenerationMode::Mixed, &mut source)
            .unwrap();
        assert_eq!(out, vec![tuple![0, 0]]);

        let excluding = including.clone().with_always_include_directed(false);
        let out = excluding
            .generate(SampleCount::Count(3), GenerationMode::Mixed, &mut source)
            .unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_random_only_skips_directed() {
        let vector = xy_vector()
            .with_directed_vector("zero", tuple![0, 0])
            .unwrap();
        let mut source = SeedSource::from_seed(42);
        let out = vector
            .generate(SampleCount::Count(4), GenerationMode::RandomOnly, &mut source)
            .unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_test_mode_emits_only_test_vectors() {
        let vector = xy_vector()
            .with_constraint(less_than())
            .with_directed_vector("dir", tuple![1, 1])
            .unwrap()
            .with_test_vector("valid", tuple![5, 5])
            .unwrap()
            .with_test_vector("invalid", tuple![10, 1])
            .unwrap();
        let mut source = SeedSource::from_seed(42);

        let out = vector
            .generate(SampleCount::Count(100), GenerationMode::Test, &mut source)
            .unwrap();
        assert_eq!(out, vec![tuple![5, 5], tuple![10, 1]]);
    }

    #[test]
    fn test_always_false_constraint_is_bounded() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let vector = xy_vector()
            .with_constraint(VectorConstraint::described("never", move |_: &[Value]| {
                counter.fetch_add(1, Ordering::SeqCst);
                false
            }))
            .with_max_vector_retries(50);
        let mut source = SeedSource::from_seed(42);

        let err = vector
            .generate(SampleCount::Count(1), GenerationMode::RandomOnly, &mut source)
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::ConstraintExhausted {
                constraint: "never".to_string(),
                attempts: 50,
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 50);
    }

    #[test]
    fn test_late_acceptance_within_ceiling() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let vector = xy_vector()
            .with_constraint(VectorConstraint::described("late", move |_: &[Value]| {
                counter.fetch_add(1, Ordering::SeqCst) >= 40
            }))
            .with_max_vector_retries(50);
        let mut source = SeedSource::from_seed(42);

        let tuple = vector.generate_vector(&mut source).unwrap();
        assert_eq!(tuple.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 41);
    }

    #[test]
    fn test_default_ceiling_reported() {
        let vector = xy_vector().with_constraint(VectorConstraint::new(|_: &[Value]| false));
        let mut source = SeedSource::from_seed(42);
        match vector.generate_vector(&mut source) {
            Err(GenerationError::ConstraintExhausted {
                constraint,
                attempts,
            }) => {
                assert_eq!(constraint, "constraint #0");
                assert_eq!(attempts, DEFAULT_MAX_VECTOR_RETRIES);
            }
            other => panic!("Expected ConstraintExhausted, got {other:?}"),
        }
    }

    #[test]
    fn test_exhaustive_cardinality() {
        let vector = Vector::new(vec![
            Argument::random("a", RngType::sequence(tuple![1, 2]).unwrap()),
            Argument::random("b", RngType::sequence(tuple!["x", "y", "z"]).unwrap()),
            Argument::random("c", RngType::sequence(tuple![true, false]).unwrap()),
        ])
        .unwrap();
        let mut source = SeedSource::from_seed(42);

        let out = vector
            .generate(SampleCount::Exhaustive, GenerationMode::RandomOnly, &mut source)
            .unwrap();
        assert_eq!(out.len(), 12);

        // Leftmost varies slowest
        assert_eq!(out[0], tuple![1, "x", true]);
        assert_eq!(out[1], tuple![1, "x", false]);
        assert_eq!(out[2], tuple![1, "y", true]);
        assert_eq!(out[11], tuple![2, "z", false]);

        for (i, a) in out.iter().enumerate() {
            for b in &out[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_exhaustive_mixed_draws_fresh_values() {
        let vector = Vector::new(vec![
            Argument::random("seq", RngType::sequence(tuple![1, 2, 3]).unwrap()),
            Argument::random("rnd", RngType::integer(10, 20).unwrap()),
        ])
        .unwrap();
        let mut source = SeedSource::from_seed(42);

        let out = vector.generate_exhaustive(&mut source).unwrap();
        assert_eq!(out.len(), 3);
        for (i, t) in out.iter().enumerate() {
            assert_eq!(t[0], Value::Int(i as i64 + 1));
            assert!((10..=20).contains(&t[1].as_i64().unwrap()));
        }
    }

    #[test]
    fn test_exhaustive_random_argument_between_sequences() {
        let vector = Vector::new(vec![
            Argument::random("a", RngType::sequence(tuple![1, 2]).unwrap()),
            Argument::random("r", RngType::float(0.0, 1.0).unwrap()),
            Argument::random("b", RngType::sequence(tuple!["x", "y"]).unwrap()),
        ])
        .unwrap();
        let mut source = SeedSource::from_seed(42);

        let out = vector.generate_exhaustive(&mut source).unwrap();
        let combos: Vec<(Value, Value)> =
            out.iter().map(|t| (t[0].clone(), t[2].clone())).collect();
        assert_eq!(
            combos,
            vec![
                (Value::Int(1), Value::from("x")),
                (Value::Int(1), Value::from("y")),
                (Value::Int(2), Value::from("x")),
                (Value::Int(2), Value::from("y")),
            ]
        );
        assert!(out.iter().all(|t| (0.0..=1.0).contains(&t[1].as_f64().unwrap())));
    }

    #[test]
    fn test_exhaustive_pure_sequence_filters_by_constraint() {
        let vector = Vector::new(vec![
            Argument::random("a", RngType::sequence(tuple![1, 2, 3]).unwrap()),
            Argument::random("b", RngType::sequence(tuple![1, 2, 3]).unwrap()),
        ])
        .unwrap()
        .with_constraint(VectorConstraint::new(|v: &[Value]| v[0] < v[1]));
        let mut source = SeedSource::from_seed(42);

        let out = vector.generate_exhaustive(&mut source).unwrap();
        assert_eq!(out, vec![tuple![1, 2], tuple![1, 3], tuple![2, 3]]);
    }

    #[test]
    fn test_exhaustive_mixed_applies_constraint_to_random_part() {
        let vector = Vector::new(vec![
            Argument::random("lo", RngType::sequence(tuple![0, 5, 9]).unwrap()),
            Argument::random("hi", RngType::integer(0, 10).unwrap()),
        ])
        .unwrap()
        .with_constraint(VectorConstraint::new(|v: &[Value]| v[0] < v[1]));
        let mut source = SeedSource::from_seed(42);

        let out = vector.generate_exhaustive(&mut source).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|t| t[0] < t[1]));
    }

    #[test]
    fn test_exhaustive_without_sequences_fails() {
        let mut source = SeedSource::from_seed(42);
        assert_eq!(
            xy_vector()
                .generate(SampleCount::Exhaustive, GenerationMode::All, &mut source)
                .unwrap_err(),
            GenerationError::NoSequenceArguments
        );
    }

    #[test]
    fn test_exhaustive_all_mode_keeps_directed_first() {
        let vector = Vector::new(vec![Argument::random(
            "s",
            RngType::sequence(tuple![1, 2]).unwrap(),
        )])
        .unwrap()
        .with_directed_vector("edge", tuple![0])
        .unwrap();
        let mut source = SeedSource::from_seed(42);

        let out = vector
            .generate(SampleCount::Exhaustive, GenerationMode::All, &mut source)
            .unwrap();
        assert_eq!(out, vec![tuple![0], tuple![1], tuple![2]]);
    }

    #[test]
    fn test_lookups() {
        let mut vector = xy_vector()
            .with_directed_vector("a", tuple![1, 2])
            .unwrap()
            .with_test_vector("t", tuple![3, 4])
            .unwrap();

        assert_eq!(vector.directed_vector_at(0).unwrap().name, "a");
        assert!(matches!(
            vector.directed_vector_at(1),
            Err(GenerationError::IndexOutOfRange { index: 1, len: 1, .. })
        ));
        assert_eq!(vector.test_vector("t").unwrap(), &tuple![3, 4][..]);
        let err = vector.test_vector("missing").unwrap_err();
        assert!(err.to_string().contains("No test vector named 'missing'"));
        assert!(vector.argument("y").is_ok());
        assert!(vector.argument("z").is_err());

        vector.remove_directed_vector("a").unwrap();
        assert!(vector.directed_vector("a").is_err());
        assert!(vector.remove_test_vector("missing").is_err());
    }

    #[test]
    fn test_determinism() {
        let vector = xy_vector().with_constraint(less_than());

        for seed in [0u64, 1, 42, u64::MAX] {
            let mut a = SeedSource::from_seed(seed);
            let mut b = SeedSource::from_seed(seed);
            let out_a = vector
                .generate(SampleCount::Count(20), GenerationMode::All, &mut a)
                .unwrap();
            let out_b = vector
                .generate(SampleCount::Count(20), GenerationMode::All, &mut b)
                .unwrap();
            assert_eq!(out_a, out_b);
        }
    }

    #[test]
    fn test_generate_vectors_names() {
        let vector = xy_vector();
        let mut source = SeedSource::from_seed(42);
        let generated = vector
            .generate_vectors(SampleCount::Count(2), GenerationMode::All, &mut source)
            .unwrap();
        assert_eq!(generated.arg_names, vec!["x", "y"]);
        assert_eq!(generated.vectors.len(), 2);
    }
}
