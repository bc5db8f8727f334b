//! Error Types
//!
//! This module defines the error types used throughout the rig.
//!
//! # Overview
//!
//! The main error type [`RigError`] covers the failure modes of building a
//! rig, from configuration or by registering entries directly:
//! - Duplicate spring or motion ids
//! - Degenerate configuration (non-positive stiffness, zero duration, ...)
//! - Malformed curve data
//! - Reading and parsing JSON configuration files
//!
//! Nothing on the per-tick path returns an error. Unknown ids referenced by
//! force or play calls degrade to no-ops with a `log` diagnostic.
//!
//! # Usage
//!
//! ```rust,ignore
//! use weapon_rig::errors::Result;
//! use weapon_rig::config::RigConfig;
//!
//! fn load() -> Result<RigConfig> {
//!     RigConfig::from_path("rig.json")
//! }
//! ```

use thiserror::Error;

/// Which registry an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Spring,
    Motion,
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdKind::Spring => f.write_str("spring"),
            IdKind::Motion => f.write_str("motion"),
        }
    }
}

/// The main error type for the rig.
#[derive(Error, Debug)]
pub enum RigError {
    // ========================================================================
    // Registration Errors
    // ========================================================================
    /// An entry with this id is already registered. The first one is kept.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId {
        /// Registry the id was inserted into
        kind: IdKind,
        /// The offending id
        id: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A numeric parameter is outside its legal range.
    #[error("Invalid configuration for '{id}': {field} = {value} ({reason})")]
    InvalidConfig {
        /// Spring or motion id
        id: String,
        /// Name of the rejected field
        field: &'static str,
        /// The rejected value
        value: f32,
        /// Human readable constraint
        reason: &'static str,
    },

    /// Curve keys are empty, unsorted or not finite.
    #[error("Invalid curve '{axis}' on motion '{id}': {reason}")]
    InvalidCurve {
        /// Motion id
        id: String,
        /// Curve axis (e.g. `position_x`)
        axis: &'static str,
        /// What is wrong with the keys
        reason: String,
    },

    /// A driver references a spring or motion that is not configured.
    #[error("{referenced_by} references unknown {kind} id: {id}")]
    UnknownId {
        /// Registry the id was looked up in
        kind: IdKind,
        /// The missing id
        id: String,
        /// Driver holding the reference
        referenced_by: &'static str,
    },

    // ========================================================================
    // I/O & Parsing Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, RigError>`.
pub type Result<T> = std::result::Result<T, RigError>;

/// Rejects a blend weight outside `[0, 1]`.
pub(crate) fn validate_weight(id: &str, weight: f32) -> Result<()> {
    if (0.0..=1.0).contains(&weight) {
        Ok(())
    } else {
        Err(RigError::InvalidConfig {
            id: id.to_string(),
            field: "weight",
            value: weight,
            reason: "must be within [0, 1]",
        })
    }
}
