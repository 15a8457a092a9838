//! # Fingerprint Subcommand
//!
//! Prints one document's structural fingerprint. The fingerprint is always
//! computed — for an invalid document it covers the raw mapping rather
//! than the normalized one.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use ldp_schema::validate_config;

/// Arguments for the fingerprint subcommand.
#[derive(Args, Debug)]
pub struct FingerprintArgs {
    /// Environment configuration document.
    pub path: PathBuf,
}

pub fn run(args: &FingerprintArgs) -> anyhow::Result<()> {
    let result = validate_config(&args.path)
        .with_context(|| format!("fingerprinting {}", args.path.display()))?;
    if !result.valid {
        tracing::warn!(
            path = %args.path.display(),
            "document is invalid; fingerprint covers the raw structure"
        );
    }
    println!("{}  {}", result.structure_fingerprint, args.path.display());
    Ok(())
}
