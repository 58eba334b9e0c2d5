//! Error types for the bundle catalog and runtime layout.

use std::path::PathBuf;

/// Result type alias for catalog and layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving and installing bundles.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Coordinate Errors
    // =========================================================================
    /// Failed to parse an artifact coordinate.
    #[error("invalid artifact coordinate '{coordinate}': {reason}")]
    InvalidCoordinate { coordinate: String, reason: String },

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    /// Resolved artifact file does not exist.
    #[error("artifact '{coordinate}' not found at {path}")]
    ArtifactNotFound { coordinate: String, path: PathBuf },

    /// Resolver could not map the coordinate to an artifact.
    #[error("failed to resolve artifact '{coordinate}': {reason}")]
    ResolutionFailed { coordinate: String, reason: String },

    // =========================================================================
    // Catalog Errors
    // =========================================================================
    /// Run level outside the supported range (strict mode only).
    #[error(
        "bundle '{coordinate}' has run level {run_level}, expected {}..={}",
        crate::constants::MIN_RUN_LEVEL,
        crate::constants::MAX_RUN_LEVEL
    )]
    InvalidRunLevel { coordinate: String, run_level: u32 },

    /// Feature name not present in the catalog.
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    // =========================================================================
    // Layout Errors
    // =========================================================================
    /// Copying a bundle or writing runtime files failed.
    #[error("failed to install into {path}: {reason}")]
    InstallFailed { path: PathBuf, reason: String },

    /// The same bundle was listed at two different run levels.
    #[error("bundle '{coordinate}' listed at run levels {first} and {second}")]
    ConflictingRunLevels {
        coordinate: String,
        first: u32,
        second: u32,
    },

    /// Configuration file could not be read or parsed.
    #[error("invalid configuration at {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
