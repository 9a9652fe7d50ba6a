//! vector-strategy library
//!
//! Constrained-random and directed test vector generation. Strategies are
//! declared in YAML or TOML files (or registered from code), compiled into
//! [`strategy_generator::Vector`]s and run to produce named test cases.
//!
//! # Crates
//!
//! - `strategy_core` - Values, kind tags and the strategy file schema
//! - `strategy_generator` - Random types, arguments, vectors and seeding
//! - `vector_strategy` (this crate) - Registry, runner and CLI handlers
//!
//! # CLI Usage
//!
//! ```bash
//! # Directed vectors followed by 20 constrained-random vectors
//! vector-strategy generate --strategies strategies.yaml --strategy ranges \
//!   --nsamples 20 --seed 42
//!
//! # Cartesian product of sequence arguments
//! vector-strategy generate --strategies strategies.yaml --strategy grid \
//!   --nsamples exhaustive --mode random-only
//!
//! # Metadata for every strategy
//! vector-strategy export --strategies strategies.yaml --format yaml
//! ```

pub mod cli;
pub mod registry;
pub mod runner;

pub use registry::{StrategyFactory, StrategyMetadata, StrategyRegistry};
pub use runner::{RunOptions, RunReport, RunnerError, SeedSetting, StrategyRunner, TestCase};
