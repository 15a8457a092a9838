//! # Structural Shape — Value-Free Type Descriptors
//!
//! Reduces a document to its *shape*: a recursive descriptor that keeps key
//! sets and runtime types and discards every literal value. The SHA-256 of
//! the canonical shape encoding is the document's structural fingerprint.
//!
//! ## Encoding
//!
//! - Objects become `{"type":"dict","keys":{k: shape(v), ...}}` (empty map
//!   for an empty object).
//! - Arrays become `{"type":"list","items":[...]}` where `items` is the
//!   canonical JSON string of each element's shape, sorted lexicographically.
//!   Sorting the serialized element shapes makes the encoding a multiset:
//!   reordering a list never changes the fingerprint.
//! - Scalars become `{"type": name}` with `name` one of `null`, `bool`,
//!   `int`, `float`, `str`.
//!
//! ## Known Limitation
//!
//! Shape-hash collisions between semantically unrelated documents are
//! theoretically possible and are an accepted false negative of the drift
//! check. Callers needing a stricter guarantee must compare shapes
//! structurally in addition to the hash.

use serde_json::{json, Value};

use crate::canonical::{to_canonical_json, CanonicalBytes};
use crate::digest::sha256_hex;
use crate::error::CanonicalizationError;

/// Build the structural shape descriptor of a JSON value.
///
/// # Errors
///
/// Returns `CanonicalizationError` if a list-element shape cannot be
/// serialized for multiset ordering. Shape trees contain only objects,
/// arrays, and type-name strings, so this does not occur in practice.
pub fn structure_shape(value: &Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null => Ok(json!({"type": "null"})),
        Value::Bool(_) => Ok(json!({"type": "bool"})),
        Value::Number(n) => {
            // YAML distinguishes integers from floats; retyping a field
            // between the two must change the fingerprint.
            let name = if n.is_i64() || n.is_u64() { "int" } else { "float" };
            Ok(json!({"type": name}))
        }
        Value::String(_) => Ok(json!({"type": "str"})),
        Value::Array(items) => {
            let mut encoded = items
                .iter()
                .map(|item| structure_shape(item).and_then(|s| to_canonical_json(&s)))
                .collect::<Result<Vec<String>, _>>()?;
            encoded.sort();
            Ok(json!({"type": "list", "items": encoded}))
        }
        Value::Object(map) => {
            let mut keys = serde_json::Map::new();
            for (k, v) in map {
                keys.insert(k.clone(), structure_shape(v)?);
            }
            Ok(json!({"type": "dict", "keys": keys}))
        }
    }
}

/// Compute the structural fingerprint of a JSON value:
/// `sha256(jcs(shape(value)))` as a lowercase hex string.
pub fn structure_fingerprint(value: &Value) -> Result<String, CanonicalizationError> {
    let shape = structure_shape(value)?;
    let bytes = CanonicalBytes::new(&shape)?;
    Ok(sha256_hex(&bytes))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Value;

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_]{0,20}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(|m| {
                    let map: serde_json::Map<String, Value> = m.into_iter().collect();
                    Value::Object(map)
                }),
            ]
        })
    }

    proptest! {
        /// Fingerprinting never fails and is deterministic.
        #[test]
        fn fingerprint_deterministic(value in json_value()) {
            let a = structure_fingerprint(&value).unwrap();
            let b = structure_fingerprint(&value).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Reversing any array leaves the fingerprint unchanged.
        #[test]
        fn fingerprint_reversal_invariant(mut items in prop::collection::vec(json_value(), 0..8)) {
            let forward = structure_fingerprint(&Value::Array(items.clone())).unwrap();
            items.reverse();
            let backward = structure_fingerprint(&Value::Array(items)).unwrap();
            prop_assert_eq!(forward, backward);
        }

        /// Replacing every string value with a different literal leaves the
        /// fingerprint unchanged (shape is value-free).
        #[test]
        fn fingerprint_value_free(value in json_value()) {
            fn blank(v: &Value) -> Value {
                match v {
                    Value::String(_) => Value::String("redacted".into()),
                    Value::Array(items) => Value::Array(items.iter().map(blank).collect()),
                    Value::Object(map) => Value::Object(
                        map.iter().map(|(k, v)| (k.clone(), blank(v))).collect(),
                    ),
                    other => other.clone(),
                }
            }
            let original = structure_fingerprint(&value).unwrap();
            let blanked = structure_fingerprint(&blank(&value)).unwrap();
            prop_assert_eq!(original, blanked);
        }
    }
}
