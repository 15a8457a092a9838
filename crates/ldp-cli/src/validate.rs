//! # Validate Subcommand
//!
//! Validates one or more environment documents and prints a per-file
//! report, human-readable by default or JSON with `--json`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use ldp_schema::{validate_config, ValidationResult};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Environment configuration documents to validate.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Emit reports as JSON instead of the human-readable summary.
    #[arg(long)]
    pub json: bool,
}

/// Run validation over every path; non-zero exit when any document is
/// invalid.
pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let mut results = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let result = validate_config(path)
            .with_context(|| format!("validating {}", path.display()))?;
        results.push(result);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            print_report(result);
        }
    }

    let invalid = results.iter().filter(|r| !r.valid).count();
    if invalid > 0 {
        anyhow::bail!("{invalid} of {} documents failed validation", results.len());
    }
    tracing::debug!(documents = results.len(), "all documents valid");
    Ok(())
}

fn print_report(result: &ValidationResult) {
    if result.valid {
        println!(
            "{}: ok (env {}, fingerprint {})",
            result.path.display(),
            result.environment,
            &result.structure_fingerprint[..12],
        );
    } else {
        println!("{}: INVALID (env {})", result.path.display(), result.environment);
        for error in result.all_errors() {
            println!("  - {error}");
        }
    }
}
