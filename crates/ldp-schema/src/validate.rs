//! # Validation Pipeline
//!
//! The single public operation: load one environment document, check
//! section presence and the typed schema independently, fingerprint the
//! best available form of the document, resolve the environment label, and
//! assemble the report.
//!
//! Everything except a missing/unreadable input file is recovered into the
//! returned [`ValidationResult`]; the pipeline is synchronous, stateless,
//! and free of logging, so it is trivially safe to call concurrently.

use std::path::Path;

use ldp_core::{structure_fingerprint, CanonicalizationError, ConfigError};
use serde_json::Value;

use crate::invariants::check_invariants;
use crate::loader::load_document;
use crate::presence::missing_sections;
use crate::report::ValidationResult;
use crate::sections::Document;
use crate::value::ErrorSink;

/// Validate one environment configuration document.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` when `path` does not resolve to a
/// regular file, `ConfigError::Io` when it cannot be read. Content-level
/// problems never error — they are reported inside the result.
pub fn validate_config(path: impl AsRef<Path>) -> Result<ValidationResult, ConfigError> {
    let path = path.as_ref();
    let (raw, errors) = load_document(path)?;

    // Presence and schema validation are independent views of the same
    // parsed mapping. A parse failure already reduced `raw` to an empty
    // mapping, which still surfaces every missing mandatory section.
    let missing = missing_sections(&raw);
    let (normalized, schema_errors) = validate_document(&raw)?;

    // Fingerprint the normalized document when schema validation produced
    // one; otherwise fall back to the raw (possibly empty) mapping.
    let fingerprint_input = normalized.as_ref().unwrap_or(&raw);
    let structure_fingerprint = structure_fingerprint(fingerprint_input)?;

    let environment = resolve_environment(&raw, path);
    let valid = errors.is_empty() && schema_errors.is_empty() && missing.is_empty();

    Ok(ValidationResult {
        path: path.to_path_buf(),
        environment,
        valid,
        errors,
        schema_errors,
        missing_sections: missing,
        structure_fingerprint,
    })
}

/// Run schema validation over a parsed mapping.
///
/// Returns the normalized document (defaults applied, unknown keys
/// dropped) when the document is fully conformant, else `None` together
/// with the sorted, deduplicated violation list. Invariants run only when
/// every section parsed with zero field errors.
pub fn validate_document(raw: &Value) -> Result<(Option<Value>, Vec<String>), ConfigError> {
    let mut sink = ErrorSink::new();
    let doc = Document::from_value(raw, &mut sink);

    if let Some(doc) = doc {
        if sink.is_empty() {
            check_invariants(&doc, &mut sink);
            if sink.is_empty() {
                let normalized =
                    serde_json::to_value(&doc).map_err(CanonicalizationError::from)?;
                return Ok((Some(normalized), Vec::new()));
            }
        }
    }
    Ok((None, sink.into_sorted()))
}

/// Resolve the report's environment label: `app.env` when it is a
/// non-empty string, else the input file's base name without extension.
/// Cosmetic only — the invariant gate reads `app.env` from the typed tree.
fn resolve_environment(raw: &Value, path: &Path) -> String {
    if let Some(env) = raw
        .get("app")
        .and_then(|app| app.get("env"))
        .and_then(Value::as_str)
    {
        if !env.is_empty() {
            return env.to_string();
        }
    }
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    const CONFORMANT: &str = r#"
app:
  name: lakehouse
  env: dev
s3:
  buckets:
    - id: raw
      versioned: true
    - id: curated
glue: {}
networking:
  vpc_cidr: 10.0.0.0/16
  subnets:
    - id: subnet-a
      cidr: 10.0.1.0/24
    - id: subnet-b
      cidr: 10.0.2.0/24
  security_groups:
    - id: sg-data
msk:
  cluster:
    name: events
    broker_count: 3
    vpc_subnet_ids: [subnet-a, subnet-b]
    security_group_ids: [sg-data]
"#;

    #[test]
    fn test_conformant_document_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "dev.yaml", CONFORMANT);
        let result = validate_config(&path).unwrap();
        assert!(result.valid, "{:?}", result.all_errors());
        assert_eq!(result.environment, "dev");
        assert_eq!(result.structure_fingerprint.len(), 64);
        assert!(result.all_errors().is_empty());
    }

    #[test]
    fn test_missing_file_raises() {
        let err = validate_config("/no/such/prod.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_mandatory_sections_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "partial.yaml", "app: {}\nglue: {}\n");
        let result = validate_config(&path).unwrap();
        assert!(!result.valid);
        assert_eq!(result.missing_sections, vec!["s3"]);
        assert_eq!(result.schema_errors, vec!["s3: section is required"]);
    }

    #[test]
    fn test_malformed_document_recovers_with_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "staging.yaml", "app: [broken\n");
        let result = validate_config(&path).unwrap();
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("invalid YAML:"));
        // Environment falls back to the file's base name.
        assert_eq!(result.environment, "staging");
        assert_eq!(result.missing_sections, vec!["app", "glue", "s3"]);
        assert_eq!(result.structure_fingerprint.len(), 64);
    }

    #[test]
    fn test_prod_destroy_policy_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let content = r#"
app: {env: prod}
s3:
  buckets:
    - {id: raw, removal_policy: DESTROY}
glue: {}
networking:
  subnets: [{id: subnet-a}, {id: subnet-b}]
"#;
        let path = write_config(&dir, "prod.yaml", content);
        let result = validate_config(&path).unwrap();
        assert!(!result.valid);
        assert!(result.schema_errors.iter().any(|e| e.contains("RETAIN")));
    }

    #[test]
    fn test_schema_errors_sorted_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let content = r#"
app: {env: 7}
s3:
  buckets:
    - {id: raw, removal_policy: KEEP}
glue: {jobs: []}
"#;
        let path = write_config(&dir, "dev.yaml", content);
        let result = validate_config(&path).unwrap();
        assert!(!result.valid);
        let mut sorted = result.schema_errors.clone();
        sorted.sort();
        assert_eq!(result.schema_errors, sorted);
        sorted.dedup();
        assert_eq!(result.schema_errors, sorted);
    }

    #[test]
    fn test_invariant_failure_fingerprints_raw_document() {
        // Same raw structure, one violating values-only difference: the
        // fingerprint must match because invariant failures fall back to
        // the raw mapping, and shapes ignore values.
        let dir = tempfile::tempdir().unwrap();
        let good = write_config(
            &dir,
            "a.yaml",
            "app: {env: dev}\ns3:\n  buckets:\n    - {id: raw, removal_policy: RETAIN}\nglue: {}\n",
        );
        let bad = write_config(
            &dir,
            "b.yaml",
            "app: {env: prod}\ns3:\n  buckets:\n    - {id: raw, removal_policy: DESTROY}\nglue: {}\n",
        );
        let good_result = validate_config(&good).unwrap();
        let bad_result = validate_config(&bad).unwrap();
        assert!(good_result.valid);
        assert!(!bad_result.valid);
        // good fingerprints the normalized document, bad the raw one; both
        // carry the same keys here because every field was set explicitly
        // and the only defaulted field (versioned) differs.
        assert_ne!(good_result.structure_fingerprint, bad_result.structure_fingerprint);
    }

    #[test]
    fn test_environment_parity_fingerprint() {
        // dev and staging: same shapes, different literals.
        let dir = tempfile::tempdir().unwrap();
        let dev = write_config(
            &dir,
            "dev.yaml",
            r#"
app: {name: lakehouse-dev, env: dev}
s3:
  buckets: [{id: raw, versioned: false}]
glue: {}
"#,
        );
        let staging = write_config(
            &dir,
            "staging.yaml",
            r#"
app: {name: lakehouse-staging, env: staging}
s3:
  buckets: [{id: raw-staging, versioned: true}]
glue: {}
"#,
        );
        let dev_result = validate_config(&dev).unwrap();
        let staging_result = validate_config(&staging).unwrap();
        assert!(dev_result.valid && staging_result.valid);
        assert_eq!(
            dev_result.structure_fingerprint,
            staging_result.structure_fingerprint
        );
    }

    #[test]
    fn test_bucket_reorder_keeps_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let forward = write_config(
            &dir,
            "f.yaml",
            "app: {env: dev}\ns3:\n  buckets:\n    - {id: raw}\n    - {id: curated, versioned: true}\nglue: {}\n",
        );
        let backward = write_config(
            &dir,
            "b.yaml",
            "app: {env: dev}\ns3:\n  buckets:\n    - {id: curated, versioned: true}\n    - {id: raw}\nglue: {}\n",
        );
        let a = validate_config(&forward).unwrap();
        let b = validate_config(&backward).unwrap();
        assert_eq!(a.structure_fingerprint, b.structure_fingerprint);
    }

    #[test]
    fn test_fingerprint_deterministic_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "dev.yaml", CONFORMANT);
        let first = validate_config(&path).unwrap();
        let second = validate_config(&path).unwrap();
        assert_eq!(first.structure_fingerprint, second.structure_fingerprint);
    }

    #[test]
    fn test_added_key_changes_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_config(
            &dir,
            "base.yaml",
            "app: {env: dev}\ns3:\n  buckets: [{id: raw}]\nglue: {}\n",
        );
        let extended = write_config(
            &dir,
            "extended.yaml",
            "app: {env: dev, region: eu-west-1}\ns3:\n  buckets: [{id: raw}]\nglue: {}\n",
        );
        let a = validate_config(&base).unwrap();
        let b = validate_config(&extended).unwrap();
        assert_ne!(a.structure_fingerprint, b.structure_fingerprint);
    }

    #[test]
    fn test_unknown_keys_do_not_affect_fingerprint() {
        // Both documents validate; the unknown key is dropped during
        // normalization, so the fingerprints match.
        let dir = tempfile::tempdir().unwrap();
        let plain = write_config(
            &dir,
            "plain.yaml",
            "app: {env: dev}\ns3:\n  buckets: [{id: raw}]\nglue: {}\n",
        );
        let noisy = write_config(
            &dir,
            "noisy.yaml",
            "app: {env: dev}\ns3:\n  buckets: [{id: raw, legacy_acl: private}]\nglue: {}\nretired: {x: 1}\n",
        );
        let a = validate_config(&plain).unwrap();
        let b = validate_config(&noisy).unwrap();
        assert!(a.valid && b.valid);
        assert_eq!(a.structure_fingerprint, b.structure_fingerprint);
    }

    #[test]
    fn test_empty_env_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "staging.yaml",
            "app: {env: \"\"}\ns3:\n  buckets: [{id: raw}]\nglue: {}\n",
        );
        let result = validate_config(&path).unwrap();
        assert_eq!(result.environment, "staging");
    }

    #[test]
    fn test_validate_document_normalizes() {
        let raw = json!({
            "app": {},
            "s3": {"buckets": [{"id": "raw", "unknown_key": 1}]},
            "glue": {},
            "never_seen": true
        });
        let (normalized, errors) = validate_document(&raw).unwrap();
        assert!(errors.is_empty());
        let normalized = normalized.unwrap();
        assert_eq!(normalized["app"]["env"], "dev");
        assert!(normalized.get("never_seen").is_none());
        assert!(normalized["s3"]["buckets"][0].get("unknown_key").is_none());
    }

    #[test]
    fn test_invariants_skipped_when_fields_fail() {
        // Broken broker_count keeps the invariant pass from running: the
        // dangling subnet reference must not be reported.
        let raw = json!({
            "app": {"env": "dev"},
            "s3": {"buckets": [{"id": "raw"}]},
            "glue": {},
            "msk": {"cluster": {"name": "events", "broker_count": 99,
                                 "vpc_subnet_ids": ["subnet-ghost"]}}
        });
        let (normalized, errors) = validate_document(&raw).unwrap();
        assert!(normalized.is_none());
        assert_eq!(
            errors,
            vec!["msk.cluster.broker_count: must be between 1 and 15, found 99"]
        );
    }
}
