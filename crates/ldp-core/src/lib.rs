//! # ldp-core — Foundational Types for the LDP Toolchain
//!
//! This crate is the bedrock of the Lakehouse Data Platform configuration
//! toolchain. It defines the primitives that make structural drift detection
//! deterministic: canonical byte production, shape reduction, and content
//! digests. Every other crate in the workspace depends on `ldp-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL digest computation flows through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for digests.
//!    This prevents split-serialization defects by construction.
//!
//! 2. **Shapes, not values.** A structural fingerprint is the digest of a
//!    document's *shape* — the recursive type descriptor with every literal
//!    value discarded. Two environments whose documents carry the same keys
//!    and types fingerprint identically regardless of content.
//!
//! 3. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that every digest path flows through canonicalization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ldp-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod shape;

// Re-export primary types for ergonomic imports.
pub use canonical::{to_canonical_json, CanonicalBytes};
pub use digest::{sha256_digest, sha256_hex, ContentDigest};
pub use error::{CanonicalizationError, ConfigError};
pub use shape::{structure_fingerprint, structure_shape};
