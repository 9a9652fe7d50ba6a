//! Named strategy registry.
//!
//! A strategy is a factory that builds a [`Vector`] for a requested sample
//! count. Strategies are registered from code with [`StrategyRegistry::register`]
//! or in bulk from a strategy file with [`StrategyRegistry::load_file`].

use crate::runner::RunnerError;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use strategy_core::StrategyFile;
use strategy_generator::{build_vector, GenerationError, SampleCount, Vector, VectorMetadata};

/// Factory producing a vector for a sample count.
pub type StrategyFactory =
    Arc<dyn Fn(SampleCount) -> Result<Vector, GenerationError> + Send + Sync>;

/// Exported metadata of one registered strategy.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyMetadata {
    pub name: String,
    #[serde(flatten)]
    pub metadata: VectorMetadata,
}

/// Strategies by name, in registration order.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: Vec<(String, StrategyFactory)>,
    default_seed: Option<u64>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy factory under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<(), RunnerError>
    where
        F: Fn(SampleCount) -> Result<Vector, GenerationError> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(RunnerError::DuplicateStrategy(name));
        }
        self.strategies.push((name, Arc::new(factory)));
        Ok(())
    }

    /// Register every strategy in a parsed strategy file.
    ///
    /// Definitions are compiled eagerly so that a malformed strategy fails
    /// at load time. The file's seed, if any, becomes the default seed.
    pub fn load(&mut self, file: &StrategyFile) -> Result<(), RunnerError> {
        for def in &file.strategies {
            let vector = build_vector(def)?;
            self.register(def.name.as_str(), move |_| Ok(vector.clone()))?;
        }
        if file.seed.is_some() {
            self.default_seed = file.seed;
        }
        tracing::debug!(
            strategies = file.strategies.len(),
            seed = ?file.seed,
            "Loaded strategy definitions"
        );
        Ok(())
    }

    /// Load and register a YAML or TOML strategy file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RunnerError> {
        let file = StrategyFile::from_file(path)?;
        self.load(&file)
    }

    /// Build a registry from a strategy file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RunnerError> {
        let mut registry = Self::new();
        registry.load_file(path)?;
        Ok(registry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.iter().any(|(n, _)| n == name)
    }

    /// Build the vector for strategy `name`.
    pub fn get(&self, name: &str, count: SampleCount) -> Result<Vector, RunnerError> {
        let (_, factory) = self
            .strategies
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| RunnerError::UnknownStrategy {
                name: name.to_string(),
                available: self.names().join(", "),
            })?;
        Ok(factory(count)?)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Seed declared by the last loaded strategy file.
    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Metadata of every registered strategy, built with a zero sample count.
    pub fn export(&self) -> Result<Vec<StrategyMetadata>, RunnerError> {
        self.names()
            .into_iter()
            .map(|name| {
                Ok(StrategyMetadata {
                    name: name.to_string(),
                    metadata: self.get(name, SampleCount::Count(0))?.to_metadata(),
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .field("default_seed", &self.default_seed)
            .finish()
    }
}
