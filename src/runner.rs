//! Strategy runner: turns a registered strategy into named test cases.

use crate::registry::StrategyRegistry;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use strategy_core::{SchemaError, Value};
use strategy_generator::{
    GenerationError, GenerationMode, LabeledVector, SampleCount, SeedSource, Vector,
};

/// Errors raised while loading or running strategies.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Strategy '{name}' not found. Available: {available}")]
    UnknownStrategy { name: String, available: String },

    #[error("Strategy '{0}' is already registered")]
    DuplicateStrategy(String),

    #[error("Invalid seed '{0}': expected an integer or 'unset'")]
    InvalidSeed(String),
}

/// Seed requested for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSetting {
    /// Use this seed
    Fixed(u64),
    /// Use the strategy file's seed, or draw one from entropy
    #[default]
    Unset,
}

impl FromStr for SeedSetting {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unset") {
            return Ok(SeedSetting::Unset);
        }
        s.parse::<u64>()
            .map(SeedSetting::Fixed)
            .map_err(|_| RunnerError::InvalidSeed(s.to_string()))
    }
}

impl fmt::Display for SeedSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedSetting::Fixed(seed) => write!(f, "{seed}"),
            SeedSetting::Unset => f.write_str("unset"),
        }
    }
}

/// Options for a single run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub nsamples: SampleCount,
    pub mode: GenerationMode,
    pub seed: SeedSetting,
    /// Emit only the directed (or, in test mode, test) vector with this name
    pub vector_name: Option<String>,
    /// Emit only the directed (or, in test mode, test) vector at this index
    pub vector_index: Option<usize>,
}

/// One generated test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    /// Vector name for named tuples, otherwise `name=value` pairs
    pub id: String,
    pub values: Vec<Value>,
}

/// Output of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub strategy: String,
    pub seed: u64,
    pub arg_names: Vec<String>,
    pub cases: Vec<TestCase>,
}

fn case_id(arg_names: &[String], values: &[Value]) -> String {
    arg_names
        .iter()
        .zip(values)
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Runs strategies from a registry against a session seed source.
///
/// The seed source lives as long as the runner, so an unset seed is drawn
/// once and shared by every run of the session.
#[derive(Debug)]
pub struct StrategyRunner {
    registry: StrategyRegistry,
    source: SeedSource,
}

impl StrategyRunner {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self {
            registry,
            source: SeedSource::new(),
        }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Run strategy `name`.
    pub fn run(&mut self, name: &str, options: &RunOptions) -> Result<RunReport, RunnerError> {
        match options.seed {
            SeedSetting::Fixed(seed) => self.source.seed(seed),
            SeedSetting::Unset => {
                if let Some(seed) = self.registry.default_seed() {
                    if !self.source.is_fixed() {
                        self.source.seed(seed);
                    }
                }
            }
        }
        let seed = self.source.refresh_seed();

        let vector = self.registry.get(name, options.nsamples)?;
        let arg_names = vector.arg_names();

        let labeled = match select(&vector, options)? {
            Some(selected) => vec![selected],
            None => vector.generate_labeled(options.nsamples, options.mode, &mut self.source)?,
        };

        let cases: Vec<TestCase> = labeled
            .into_iter()
            .map(|v| TestCase {
                id: v.name.unwrap_or_else(|| case_id(&arg_names, &v.values)),
                values: v.values,
            })
            .collect();

        tracing::info!(
            strategy = name,
            seed,
            mode = %options.mode,
            cases = cases.len(),
            "Generated test cases"
        );

        Ok(RunReport {
            strategy: name.to_string(),
            seed,
            arg_names,
            cases,
        })
    }
}

/// The single vector requested by name or index, if any. A name takes
/// precedence over an index.
fn select(vector: &Vector, options: &RunOptions) -> Result<Option<LabeledVector>, GenerationError> {
    let test_mode = options.mode == GenerationMode::Test;

    if let Some(name) = &options.vector_name {
        let values = if test_mode {
            vector.test_vector(name)?
        } else {
            vector.directed_vector(name)?
        };
        return Ok(Some(LabeledVector {
            name: Some(name.clone()),
            values: values.to_vec(),
        }));
    }

    if let Some(index) = options.vector_index {
        let found = if test_mode {
            vector.test_vector_at(index)?
        } else {
            vector.directed_vector_at(index)?
        };
        return Ok(Some(LabeledVector {
            name: Some(found.name.clone()),
            values: found.values.clone(),
        }));
    }

    Ok(None)
}
