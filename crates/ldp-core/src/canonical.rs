//! # Canonical Serialization — JCS-Compatible Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for
//! bytes used in digest computation across the LDP toolchain.
//!
//! ## Determinism Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which serializes via
//! RFC 8785 (JSON Canonicalization Scheme): sorted object keys, compact
//! separators, UTF-8 output. Any function that computes a digest must accept
//! `&CanonicalBytes`, so there is no code path that hashes bytes produced
//! by an ad-hoc serializer.

use serde::Serialize;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Serialization uses sorted keys with compact separators (RFC 8785).
/// - The byte sequence is valid UTF-8 JSON.
///
/// These invariants are enforced by the constructor and cannot be violated
/// by downstream code because the inner `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`. All digest
    /// computation in the workspace must flow through this constructor.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if JCS
    /// serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        Ok(Self(to_canonical_json(obj)?.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Serialize a value to its JCS-canonical JSON string (RFC 8785).
///
/// Sorted keys, compact separators, no trailing whitespace. Shared by
/// `CanonicalBytes::new()` and by shape construction, which sorts the
/// canonical strings of list-element shapes to obtain an order-insensitive
/// encoding.
pub fn to_canonical_json(obj: &impl Serialize) -> Result<String, CanonicalizationError> {
    Ok(serde_jcs::to_string(obj)?)
}
