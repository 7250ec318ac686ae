//! Error types for extended-unrar
//!
//! Two tiers exist:
//! - configuration errors, raised while reading the host environment and
//!   mapped to the host's "error" exit code
//! - per-file post-processing errors, which are logged and folded into the
//!   run status but never abort the run

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for extended-unrar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for extended-unrar
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The environment variable that caused the error (e.g., "NZBPO_WAITTIME")
        key: Option<String>,
    },

    /// Post-processing error (extract, delete, etc.)
    #[error("post-processing error: {0}")]
    PostProcess(#[from] PostProcessError),

    /// External tool execution failed (could not be launched, killed, etc.)
    #[error("external tool error: {0}")]
    ExternalTool(String),
}

impl Error {
    /// Build a configuration error tied to an environment variable
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Post-processing errors (extraction, leftover deletion, pattern handling)
#[derive(Debug, Error)]
pub enum PostProcessError {
    /// Extraction of a single archive failed
    #[error("extraction failed for {archive}: {reason}")]
    ExtractionFailed {
        /// The archive that could not be extracted
        archive: PathBuf,
        /// Why the extraction failed (exit code, signal, etc.)
        reason: String,
    },

    /// A leftover file could not be deleted
    #[error("failed to delete {path}: {reason}")]
    DeleteFailed {
        /// The file that could not be deleted
        path: PathBuf,
        /// Why the deletion failed
        reason: String,
    },

    /// The leftover wildcard pattern cannot be used
    #[error("invalid wildcard pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The pattern as configured
        pattern: String,
        /// Why it was rejected
        reason: String,
    },
}
