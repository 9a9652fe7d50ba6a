//! Core types for vector-strategy.
//!
//! This crate provides the foundational types shared by the generation
//! engine and the runner:
//!
//! - [`Value`] - Dynamic element of a generated test vector
//! - [`ValueKind`] - Kind tags exported in strategy metadata
//! - [`StrategyFile`] - Strategy definitions loaded from YAML or TOML
//!
//! # Architecture
//!
//! ```text
//! strategy-core (this crate)
//!    │
//!    ├─── strategy-generator  (compiles definitions, draws values)
//!    │
//!    └─── vector-strategy     (registry, runner, CLI)
//! ```

pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{
    ArgumentDefinition, CompareOp, ConstraintConfig, NamedValues, PredicateConfig,
    RngTypeConfig, SchemaError, StrategyFile, VectorDefinition, WeightedRangeConfig,
    DEFAULT_CHARSET,
};
pub use types::ValueKind;
pub use values::Value;
