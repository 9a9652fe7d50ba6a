//! CLI argument definitions and command handlers.

use crate::registry::StrategyRegistry;
use crate::runner::{RunOptions, SeedSetting, StrategyRunner};
use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use strategy_generator::{GenerationMode, SampleCount};

/// Output format for generated cases and exported metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for `generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the strategy file (YAML or TOML)
    #[arg(long, value_name = "FILE")]
    pub strategies: PathBuf,

    /// Strategy to run
    #[arg(long)]
    pub strategy: String,

    /// Number of random vectors, or `exhaustive`
    #[arg(long, env = "VECTOR_STRATEGY_NSAMPLES", default_value = "10")]
    pub nsamples: SampleCount,

    /// Generation mode: all, random-only, directed-only, mixed or test
    #[arg(long, env = "VECTOR_STRATEGY_MODE", default_value = "all")]
    pub mode: GenerationMode,

    /// Seed as an integer, or `unset` to use the file seed or fresh entropy
    #[arg(long, env = "VECTOR_STRATEGY_SEED", default_value = "unset")]
    pub seed: SeedSetting,

    /// Emit only the named directed (or test) vector
    #[arg(long)]
    pub vector_name: Option<String>,

    /// Emit only the directed (or test) vector at this index
    #[arg(long)]
    pub vector_index: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl GenerateArgs {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            nsamples: self.nsamples,
            mode: self.mode,
            seed: self.seed,
            vector_name: self.vector_name.clone(),
            vector_index: self.vector_index,
        }
    }
}

/// Arguments for `export`.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Path to the strategy file (YAML or TOML)
    #[arg(long, value_name = "FILE")]
    pub strategies: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Arguments for `list`.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Path to the strategy file (YAML or TOML)
    #[arg(long, value_name = "FILE")]
    pub strategies: PathBuf,
}

/// Serialize `value` in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).context("Failed to serialize output as YAML")
        }
    }
}

fn load_registry(path: &Path) -> anyhow::Result<StrategyRegistry> {
    StrategyRegistry::from_file(path)
        .with_context(|| format!("Failed to load strategies from {path:?}"))
}

/// Generate test cases for one strategy and render them.
pub fn generate(args: &GenerateArgs) -> anyhow::Result<String> {
    let registry = load_registry(&args.strategies)?;
    let mut runner = StrategyRunner::new(registry);
    let report = runner
        .run(&args.strategy, &args.run_options())
        .with_context(|| format!("Failed to generate vectors for '{}'", args.strategy))?;
    render(&report, args.format)
}

/// Export metadata for every strategy in a file.
pub fn export(args: &ExportArgs) -> anyhow::Result<String> {
    let registry = load_registry(&args.strategies)?;
    let metadata = registry.export().context("Failed to export strategy metadata")?;
    render(&metadata, args.format)
}

/// List strategy names, one per line.
pub fn list(args: &ListArgs) -> anyhow::Result<String> {
    let registry = load_registry(&args.strategies)?;
    Ok(registry.names().join("\n"))
}
