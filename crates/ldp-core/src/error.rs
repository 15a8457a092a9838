//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the LDP toolchain. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Operational errors (missing file, unreadable file) fail loudly and are
//!   never folded into a validation report.
//! - Content-level problems (malformed YAML, schema violations, missing
//!   sections) are *not* errors at this level; they are carried inside the
//!   report so that every validation call returns a complete picture.

use std::path::PathBuf;

use thiserror::Error;

/// Operational errors raised by the configuration pipeline.
///
/// These signal a caller mistake or an environment problem, never invalid
/// document content.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The input path does not resolve to a regular file.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// The path that failed to resolve.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Canonical serialization failed while fingerprinting.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JCS serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
