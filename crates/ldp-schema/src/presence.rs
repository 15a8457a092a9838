//! # Section Presence — Mandatory Top-Level Sections
//!
//! Independent of schema validation: reports which mandatory sections are
//! structurally absent from a parsed document.

use serde_json::Value;

/// Top-level sections every environment document must declare.
pub const REQUIRED_SECTIONS: [&str; 3] = ["app", "s3", "glue"];

/// Required sections whose empty mapping counts as missing. `s3` carries
/// nothing but its mandatory bucket list, so `s3: {}` declares no storage at
/// all; `app` is fully defaulted and `glue: {}` is explicitly acceptable.
const MUST_BE_NON_EMPTY: [&str; 1] = ["s3"];

/// Sorted names of mandatory sections that are absent, `null`, or (for
/// sections that must carry content) an empty mapping.
pub fn missing_sections(document: &Value) -> Vec<String> {
    let mut missing: Vec<String> = REQUIRED_SECTIONS
        .iter()
        .filter(|name| {
            match document.get(**name) {
                None | Some(Value::Null) => true,
                Some(Value::Object(map)) => map.is_empty() && MUST_BE_NON_EMPTY.contains(*name),
                // Wrong-typed sections are present; the schema validator
                // reports them.
                Some(_) => false,
            }
        })
        .map(|name| name.to_string())
        .collect();
    missing.sort();
    missing
}
