//! # ldp-schema — Environment Document Validation
//!
//! Validates per-environment infrastructure configuration documents
//! (dev/staging/prod) against the typed section tree, enforces
//! cross-section referential integrity and environment-specific rules, and
//! produces a value-independent structural fingerprint for drift detection
//! between environments.
//!
//! ## Pipeline
//!
//! [`validate_config`] is the single public operation:
//!
//! 1. **Load** — read and parse the YAML document; parse failures are
//!    recovered into the report, a missing file fails fast.
//! 2. **Presence** — report absent mandatory sections, independent of the
//!    schema pass.
//! 3. **Schema** — construct the typed [`sections::Document`], collecting
//!    *every* field violation; run the cross-section invariants only when
//!    all sections parsed cleanly.
//! 4. **Fingerprint** — hash the structural shape of the normalized
//!    document (or the raw mapping when validation failed).
//! 5. **Assemble** — one immutable [`ValidationResult`].
//!
//! ## Crate Policy
//!
//! - Depends only on `ldp-core` internally.
//! - Stateless and synchronous; no logging, no caches, no shared state.
//! - No `unwrap()` outside tests; `expect()` only for compiled-in patterns.

mod invariants;
pub mod loader;
pub mod presence;
pub mod report;
pub mod sections;
pub mod validate;
mod value;

pub use loader::load_document;
pub use presence::{missing_sections, REQUIRED_SECTIONS};
pub use report::ValidationResult;
pub use sections::Document;
pub use validate::{validate_config, validate_document};
pub use value::{ErrorSink, FieldPath};
