//! # Document Loader — YAML to JSON Value Tree
//!
//! Reads an environment configuration file and parses it into a
//! `serde_json::Value` mapping. A missing file is an operational error and
//! fails fast; malformed content is *recovered*: the parse failure becomes a
//! string in the returned error list and the document becomes an empty
//! mapping, so downstream stages can still report missing sections and a
//! fingerprint.

use std::path::Path;

use ldp_core::ConfigError;
use serde_json::{Map, Value};

use crate::value::type_name;

/// Load and parse one configuration document.
///
/// Returns the parsed mapping together with the (possibly empty) list of
/// parse-level errors. A `null` or empty document is an empty mapping, not
/// an error. A document whose root is not a mapping is recovered the same
/// way as a syntax error.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` when `path` does not resolve to a
/// regular file, and `ConfigError::Io` when the file cannot be read. Never
/// fails for content-level problems.
pub fn load_document(path: &Path) -> Result<(Value, Vec<String>), ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;

    let mut errors = Vec::new();
    let value = match serde_yaml::from_str::<serde_yaml::Value>(&content) {
        Ok(yaml) => match yaml_to_json_value(&yaml) {
            Ok(Value::Null) => Value::Object(Map::new()),
            Ok(Value::Object(map)) => Value::Object(map),
            Ok(other) => {
                errors.push(format!(
                    "document root must be a mapping, found {}",
                    type_name(&other)
                ));
                Value::Object(Map::new())
            }
            Err(reason) => {
                errors.push(format!("invalid YAML: {reason}"));
                Value::Object(Map::new())
            }
        },
        Err(e) => {
            errors.push(format!("invalid YAML: {e}"));
            Value::Object(Map::new())
        }
    };
    Ok((value, errors))
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// YAML has a richer type system than JSON (tags, non-string keys), but
/// configuration documents use only the JSON-compatible subset. Tags are
/// ignored; numeric and boolean mapping keys are stringified.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_temp(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    #[test]
    fn test_missing_file_fails_fast() {
        let err = load_document(Path::new("/nonexistent/dev.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_empty_document_is_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "empty.yaml", "");
        let (value, errors) = load_document(&path).unwrap();
        assert_eq!(value, serde_json::json!({}));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_null_document_is_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "null.yaml", "null\n");
        let (value, errors) = load_document(&path).unwrap();
        assert_eq!(value, serde_json::json!({}));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_malformed_document_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "broken.yaml", "app: [unclosed\n");
        let (value, errors) = load_document(&path).unwrap();
        assert_eq!(value, serde_json::json!({}));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("invalid YAML:"));
    }

    #[test]
    fn test_non_mapping_root_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "list.yaml", "- a\n- b\n");
        let (value, errors) = load_document(&path).unwrap();
        assert_eq!(value, serde_json::json!({}));
        assert_eq!(
            errors,
            vec!["document root must be a mapping, found list".to_string()]
        );
    }

    #[test]
    fn test_yaml_types_convert() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "typed.yaml",
            "app:\n  env: dev\n  replicas: 3\n  enabled: true\n  ratio: 0.5\n",
        );
        let (value, errors) = load_document(&path).unwrap();
        assert!(errors.is_empty());
        assert_eq!(value["app"]["env"], "dev");
        assert_eq!(value["app"]["replicas"], 3);
        assert_eq!(value["app"]["enabled"], true);
        assert_eq!(value["app"]["ratio"], 0.5);
    }

    #[test]
    fn test_non_string_keys_stringified() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "keys.yaml", "app:\n  1: one\n  true: yes\n");
        let (value, errors) = load_document(&path).unwrap();
        assert!(errors.is_empty());
        assert_eq!(value["app"]["1"], "one");
        assert!(value["app"].get("true").is_some());
    }
}
