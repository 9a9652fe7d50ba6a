//! Generation engine for vector-strategy.
//!
//! This crate turns argument and vector definitions into ordered lists of
//! test vectors. All randomness flows through an explicit [`SeedSource`], so
//! a run with the same seed and configuration reproduces exactly.
//!
//! # Architecture
//!
//! ```text
//! VectorDefinition (YAML/TOML)
//!        │  builder
//!        ▼
//! ┌──────────────────────────┐
//! │          Vector          │
//! │                          │
//! │  - arguments (ordered)   │──► Argument ──► RngType ──► generators::*
//! │  - directed / test tuples│
//! │  - constraints           │
//! └────────────┬─────────────┘
//!              │  generate(count, mode, &mut SeedSource)
//!              ▼
//!      Vec<Vec<Value>>  (one tuple per test case)
//! ```
//!
//! # Example
//!
//! ```rust
//! use strategy_core::{tuple, Value};
//! use strategy_generator::{
//!     Argument, GenerationMode, RngType, SampleCount, SeedSource, Vector, VectorConstraint,
//! };
//!
//! let vector = Vector::new(vec![
//!     Argument::random("x", RngType::integer(0, 10).unwrap()),
//!     Argument::random("y", RngType::integer(0, 10).unwrap()),
//! ])
//! .unwrap()
//! .with_constraint(VectorConstraint::described("x < y", |v: &[Value]| v[0] < v[1]))
//! .with_directed_vector("eq", tuple![5, 5])
//! .unwrap();
//!
//! let mut source = SeedSource::from_seed(42);
//! let vectors = vector
//!     .generate(SampleCount::Count(5), GenerationMode::All, &mut source)
//!     .unwrap();
//! assert_eq!(vectors.len(), 6);
//! assert_eq!(vectors[0], tuple![5, 5]);
//! ```
//!
//! # Random Types
//!
//! - `integer` / `float` - Uniform in an inclusive range
//! - `boolean` - Bernoulli with configurable true probability
//! - `string` - Random length and characters from a charset
//! - `choice` - Uniform pick from a list
//! - `sequence` - Ordered list, fully enumerated in exhaustive runs
//! - `enum` - Member names, optionally weighted
//! - `weighted_integer` / `weighted_float` - Pick a range by weight, then
//!   draw uniformly inside it

pub mod argument;
pub mod builder;
pub mod error;
pub mod generators;
pub mod metadata;
pub mod mode;
pub mod predicate;
pub mod rng_type;
pub mod seed;
pub mod vector;

// Re-exports for convenience
pub use argument::{Argument, ArgumentMode};
pub use builder::{build_argument, build_constraint, build_predicate, build_rng_type, build_vector};
pub use error::GenerationError;
pub use metadata::{ArgumentMetadata, ArgumentModeTag, VectorMetadata};
pub use mode::{GenerationMode, SampleCount};
pub use predicate::{Predicate, ValuePredicate, VectorConstraint};
pub use rng_type::{RngKind, RngType, WeightedRange, DEFAULT_MAX_RETRIES};
pub use seed::SeedSource;
pub use vector::{
    GeneratedVectors, LabeledVector, NamedVector, Vector, DEFAULT_MAX_VECTOR_RETRIES,
};
