//! # ldp CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Lakehouse Data Platform configuration toolchain.
///
/// Validates per-environment infrastructure documents, prints structural
/// fingerprints, and detects structural drift between environments.
#[derive(Parser, Debug)]
#[command(name = "ldp", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate environment configuration documents.
    Validate(ldp_cli::validate::ValidateArgs),
    /// Print a document's structural fingerprint.
    Fingerprint(ldp_cli::fingerprint::FingerprintArgs),
    /// Detect structural drift between environments.
    Drift(ldp_cli::drift::DriftArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => ldp_cli::validate::run(&args),
        Commands::Fingerprint(args) => ldp_cli::fingerprint::run(&args),
        Commands::Drift(args) => ldp_cli::drift::run(&args),
    }
}
