//! # Field Extraction — Typed Access over Raw Documents
//!
//! Helpers that pull typed fields out of a parsed `serde_json::Value` tree
//! while recording every violation into an [`ErrorSink`]. Section
//! constructors are built on these so that validation reports *all* problems
//! in a document instead of stopping at the first.
//!
//! Error strings have the fixed form `<dotted.path>: <message>`, with the
//! literal path `root` when no field path applies.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

pub(crate) type Object = Map<String, Value>;

/// Dotted path to a field inside a document (`s3.buckets[0].removal_policy`).
#[derive(Debug, Clone)]
pub struct FieldPath(String);

impl FieldPath {
    /// The document root (displays as `root`).
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Path for a top-level section.
    pub fn section(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Child key path.
    pub fn key(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Indexed element path.
    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{i}]", self.0))
    }

    /// The dotted path, or `root` for the document root.
    pub fn as_str(&self) -> &str {
        if self.0.is_empty() {
            "root"
        } else {
            &self.0
        }
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulates `path: message` violations across the whole validation pass.
#[derive(Debug, Default)]
pub struct ErrorSink {
    items: Vec<String>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one violation at the given path.
    pub fn push(&mut self, path: &FieldPath, message: impl AsRef<str>) {
        self.items.push(format!("{}: {}", path.as_str(), message.as_ref()));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Consume the sink, yielding the violations sorted lexicographically
    /// and deduplicated — the deterministic report order.
    pub fn into_sorted(self) -> Vec<String> {
        let mut items = self.items;
        items.sort();
        items.dedup();
        items
    }
}

/// Runtime type name of a JSON value, as it appears in error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Require a value to be a mapping.
pub(crate) fn as_object<'a>(
    value: &'a Value,
    path: &FieldPath,
    sink: &mut ErrorSink,
) -> Option<&'a Object> {
    match value {
        Value::Object(map) => Some(map),
        other => {
            sink.push(path, format!("must be a mapping, found {}", type_name(other)));
            None
        }
    }
}

/// Optional string field. Absent and null are both "not set"; any other
/// non-string value is a violation.
pub(crate) fn opt_str(
    obj: &Object,
    path: &FieldPath,
    key: &str,
    sink: &mut ErrorSink,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            sink.push(
                &path.key(key),
                format!("must be a string, found {}", type_name(other)),
            );
            None
        }
    }
}

/// Required string field.
pub(crate) fn req_str(
    obj: &Object,
    path: &FieldPath,
    key: &str,
    sink: &mut ErrorSink,
) -> Option<String> {
    if matches!(obj.get(key), None | Some(Value::Null)) {
        sink.push(&path.key(key), "is required");
        return None;
    }
    opt_str(obj, path, key, sink)
}

/// Boolean field with a default for absent/null.
pub(crate) fn bool_or(
    obj: &Object,
    path: &FieldPath,
    key: &str,
    default: bool,
    sink: &mut ErrorSink,
) -> bool {
    match obj.get(key) {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            sink.push(
                &path.key(key),
                format!("must be a boolean, found {}", type_name(other)),
            );
            default
        }
    }
}

/// Optional integer field constrained to an inclusive range.
pub(crate) fn opt_int_in(
    obj: &Object,
    path: &FieldPath,
    key: &str,
    lo: i64,
    hi: i64,
    sink: &mut ErrorSink,
) -> Option<i64> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => {
            let v = n.as_i64().unwrap_or(i64::MAX);
            if v < lo || v > hi {
                sink.push(
                    &path.key(key),
                    format!("must be between {lo} and {hi}, found {v}"),
                );
                None
            } else {
                Some(v)
            }
        }
        Some(other) => {
            sink.push(
                &path.key(key),
                format!("must be an integer, found {}", type_name(other)),
            );
            None
        }
    }
}

/// Optional string field restricted to an allowed set.
pub(crate) fn opt_enum(
    obj: &Object,
    path: &FieldPath,
    key: &str,
    allowed: &[&str],
    sink: &mut ErrorSink,
) -> Option<String> {
    let s = opt_str(obj, path, key, sink)?;
    if allowed.contains(&s.as_str()) {
        Some(s)
    } else {
        let choices = allowed
            .iter()
            .map(|a| format!("'{a}'"))
            .collect::<Vec<_>>()
            .join(", ");
        sink.push(&path.key(key), format!("must be one of {choices}, found '{s}'"));
        None
    }
}

/// Optional list of plain strings (e.g. referenced subnet ids).
pub(crate) fn opt_str_list(
    obj: &Object,
    path: &FieldPath,
    key: &str,
    sink: &mut ErrorSink,
) -> Option<Vec<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            let list_path = path.key(key);
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) => out.push(s.clone()),
                    other => sink.push(
                        &list_path.index(i),
                        format!("must be a string, found {}", type_name(other)),
                    ),
                }
            }
            Some(out)
        }
        Some(other) => {
            sink.push(
                &path.key(key),
                format!("must be a list, found {}", type_name(other)),
            );
            None
        }
    }
}

/// Optional list of sub-records. When the key is present the list must be
/// non-empty; each element is parsed with `parse`, which records its own
/// violations. Elements that fail to parse are dropped — by then the sink is
/// non-empty, so the partially-built list never reaches a normalized
/// document.
pub(crate) fn opt_record_list<T>(
    obj: &Object,
    path: &FieldPath,
    key: &str,
    sink: &mut ErrorSink,
    parse: impl Fn(&Value, &FieldPath, &mut ErrorSink) -> Option<T>,
) -> Option<Vec<T>> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            let list_path = path.key(key);
            if items.is_empty() {
                sink.push(&list_path, "must be a non-empty list");
                return None;
            }
            let parsed = items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| parse(item, &list_path.index(i), sink))
                .collect();
            Some(parsed)
        }
        Some(other) => {
            sink.push(
                &path.key(key),
                format!("must be a list, found {}", type_name(other)),
            );
            None
        }
    }
}

/// Required list of sub-records (absent or null is itself a violation).
pub(crate) fn req_record_list<T>(
    obj: &Object,
    path: &FieldPath,
    key: &str,
    sink: &mut ErrorSink,
    parse: impl Fn(&Value, &FieldPath, &mut ErrorSink) -> Option<T>,
) -> Option<Vec<T>> {
    if matches!(obj.get(key), None | Some(Value::Null)) {
        sink.push(&path.key(key), "is required");
        return None;
    }
    opt_record_list(obj, path, key, sink, parse)
}

/// Reject duplicate identifying keys within a record list. The violation is
/// reported at the `id` path of the *second* (and later) occurrence.
pub(crate) fn reject_duplicate_ids<'a>(
    ids: impl IntoIterator<Item = (usize, &'a str)>,
    list_path: &FieldPath,
    label: &str,
    sink: &mut ErrorSink,
) {
    let mut seen = BTreeSet::new();
    for (i, id) in ids {
        if !seen.insert(id) {
            sink.push(
                &list_path.index(i).key("id"),
                format!("duplicate {label} '{id}'"),
            );
        }
    }
}

/// Dotted-quad/prefix pattern for CIDR fields (`10.0.0.0/16`).
fn cidr_pattern() -> &'static Regex {
    static CIDR_RE: OnceLock<Regex> = OnceLock::new();
    CIDR_RE.get_or_init(|| {
        Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}/\d{1,2}$")
            .expect("CIDR pattern is a valid regex")
    })
}

/// Optional CIDR field (`a.b.c.d/nn`).
pub(crate) fn opt_cidr(
    obj: &Object,
    path: &FieldPath,
    key: &str,
    sink: &mut ErrorSink,
) -> Option<String> {
    let s = opt_str(obj, path, key, sink)?;
    if cidr_pattern().is_match(&s) {
        Some(s)
    } else {
        sink.push(
            &path.key(key),
            format!("must be a CIDR block like '10.0.0.0/16', found '{s}'"),
        );
        None
    }
}
