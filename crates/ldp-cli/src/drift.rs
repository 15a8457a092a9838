//! # Drift Subcommand
//!
//! Validates a set of environment documents and groups them by structural
//! fingerprint. Environments in different groups have drifted apart
//! structurally — one of them carries keys or types the others do not.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use ldp_schema::validate_config;

/// Arguments for the drift subcommand.
#[derive(Args, Debug)]
pub struct DriftArgs {
    /// Environment configuration documents to compare.
    #[arg(required = true, num_args = 2..)]
    pub paths: Vec<PathBuf>,
}

/// Compare fingerprints across environments; non-zero exit on drift or on
/// any invalid document.
pub fn run(args: &DriftArgs) -> anyhow::Result<()> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut invalid = Vec::new();

    for path in &args.paths {
        let result = validate_config(path)
            .with_context(|| format!("validating {}", path.display()))?;
        if !result.valid {
            invalid.push(result.environment.clone());
        }
        groups
            .entry(result.structure_fingerprint.clone())
            .or_default()
            .push(result.environment.clone());
    }

    if !invalid.is_empty() {
        anyhow::bail!(
            "cannot compare structures: invalid environments: {}",
            invalid.join(", ")
        );
    }

    if groups.len() == 1 {
        println!(
            "no structural drift across {} environments",
            args.paths.len()
        );
        return Ok(());
    }

    println!("structural drift detected across {} groups:", groups.len());
    for (fingerprint, environments) in &groups {
        println!("  {}  {}", &fingerprint[..12], environments.join(", "));
    }
    anyhow::bail!("environments have diverged structurally");
}
