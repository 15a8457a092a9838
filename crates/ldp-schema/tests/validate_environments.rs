//! Integration test: validate every environment document under `configs/`
//! and check cross-environment structural parity.
//!
//! The fixtures are kept structurally identical on purpose: dev, staging,
//! and prod differ only in literal values, so their fingerprints must
//! match. Structural drift between environments is a fixture bug, not a
//! schema bug — fix the offending document, not the assertion.

use std::path::PathBuf;

use ldp_schema::validate_config;

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

/// All environment documents under `configs/`, sorted by name.
fn environment_files() -> Vec<PathBuf> {
    let configs_dir = repo_root().join("configs");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&configs_dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", configs_dir.display()))
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "yaml"))
        .collect();
    files.sort();
    files
}

#[test]
fn test_discover_environment_files() {
    let files = environment_files();
    let names: Vec<String> = files
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(names, vec!["dev.yaml", "prod.yaml", "staging.yaml"]);
}

#[test]
fn test_all_environment_configs_valid() {
    let root = repo_root();
    let mut failed = Vec::new();

    for path in environment_files() {
        let result = validate_config(&path).expect("fixture exists");
        if !result.valid {
            let relative = path.strip_prefix(&root).unwrap_or(&path);
            for error in result.all_errors() {
                failed.push(format!("{}: {error}", relative.display()));
            }
        }
    }

    assert!(
        failed.is_empty(),
        "{} violations across environment configs:\n{}",
        failed.len(),
        failed.join("\n")
    );
}

#[test]
fn test_environments_resolve_from_content() {
    let mut labels: Vec<String> = environment_files()
        .iter()
        .map(|p| validate_config(p).expect("fixture exists").environment)
        .collect();
    labels.sort();
    assert_eq!(labels, vec!["dev", "prod", "staging"]);
}

#[test]
fn test_cross_environment_structural_parity() {
    let fingerprints: Vec<(String, String)> = environment_files()
        .iter()
        .map(|p| {
            let result = validate_config(p).expect("fixture exists");
            (result.environment, result.structure_fingerprint)
        })
        .collect();

    let (_, reference) = &fingerprints[0];
    for (environment, fingerprint) in &fingerprints {
        assert_eq!(
            fingerprint, reference,
            "environment '{environment}' drifted structurally from '{}'",
            fingerprints[0].0
        );
    }
}

#[test]
fn test_fingerprints_stable_across_calls() {
    for path in environment_files() {
        let first = validate_config(&path).expect("fixture exists");
        let second = validate_config(&path).expect("fixture exists");
        assert_eq!(
            first.structure_fingerprint, second.structure_fingerprint,
            "non-deterministic fingerprint for {}",
            path.display()
        );
    }
}
