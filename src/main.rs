//! Command-line interface for vector-strategy
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate test cases for one strategy
//! vector-strategy generate --strategies strategies.yaml --strategy ranges \
//!   --nsamples 10 --mode all --seed 42
//!
//! # Replay a single directed vector
//! vector-strategy generate --strategies strategies.yaml --strategy ranges \
//!   --vector-name eq
//!
//! # Export strategy metadata
//! vector-strategy export --strategies strategies.yaml --format json
//!
//! # List strategies
//! vector-strategy list --strategies strategies.yaml
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vector_strategy::cli::{self, ExportArgs, GenerateArgs, ListArgs};

#[derive(Parser)]
#[command(name = "vector-strategy")]
#[command(about = "Constrained-random and directed test vector generation")]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate test cases for a strategy
    Generate(GenerateArgs),

    /// Export metadata for every strategy in a file
    Export(ExportArgs),

    /// List strategies in a file
    List(ListArgs),
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let output = match &cli.command {
        Commands::Generate(args) => cli::generate(args)?,
        Commands::Export(args) => cli::export(args)?,
        Commands::List(args) => cli::list(args)?,
    };
    println!("{output}");
    Ok(())
}
