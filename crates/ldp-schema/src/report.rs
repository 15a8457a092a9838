//! # Validation Report — The Immutable Result Object
//!
//! One `ValidationResult` per validated document. Pure data: the pipeline
//! assembles it, callers read it. There is no partial-success notion — a
//! document with one schema error and zero missing sections is still
//! invalid.

use std::path::PathBuf;

use serde::Serialize;

/// The complete report for one environment configuration document.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// The validated file.
    pub path: PathBuf,
    /// Environment label: `app.env`, else the file's base name.
    pub environment: String,
    /// True iff `errors`, `schema_errors`, and `missing_sections` are all
    /// empty.
    pub valid: bool,
    /// Parse-level errors, in occurrence order.
    pub errors: Vec<String>,
    /// Field and invariant violations, sorted lexicographically and
    /// deduplicated.
    pub schema_errors: Vec<String>,
    /// Mandatory top-level sections that are structurally absent, sorted.
    pub missing_sections: Vec<String>,
    /// SHA-256 hex of the document's structural shape.
    pub structure_fingerprint: String,
}

impl ValidationResult {
    /// Every problem in one flat list: parse errors, then schema errors,
    /// then `missing section: <name>` entries. The order is fixed so
    /// reports diff cleanly between runs.
    pub fn all_errors(&self) -> Vec<String> {
        self.errors
            .iter()
            .cloned()
            .chain(self.schema_errors.iter().cloned())
            .chain(
                self.missing_sections
                    .iter()
                    .map(|name| format!("missing section: {name}")),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_errors_order_is_fixed() {
        let result = ValidationResult {
            path: PathBuf::from("dev.yaml"),
            environment: "dev".to_string(),
            valid: false,
            errors: vec!["invalid YAML: oops".to_string()],
            schema_errors: vec!["app.env: must be a string, found int".to_string()],
            missing_sections: vec!["glue".to_string(), "s3".to_string()],
            structure_fingerprint: "0".repeat(64),
        };
        assert_eq!(
            result.all_errors(),
            vec![
                "invalid YAML: oops",
                "app.env: must be a string, found int",
                "missing section: glue",
                "missing section: s3",
            ]
        );
    }

    #[test]
    fn test_all_errors_empty_when_valid() {
        let result = ValidationResult {
            path: PathBuf::from("dev.yaml"),
            environment: "dev".to_string(),
            valid: true,
            errors: vec![],
            schema_errors: vec![],
            missing_sections: vec![],
            structure_fingerprint: "0".repeat(64),
        };
        assert!(result.all_errors().is_empty());
    }
}
