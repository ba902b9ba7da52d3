//! Error types for the tfs plan analyzer.
//!
//! This module provides the error hierarchy for every fallible stage:
//! settings, change-set loading, terminal handling, and report delivery.
//! Everything that happens inside an interactive session is total by
//! construction, so no variant here describes a navigation failure.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tfs.
#[derive(Debug, Error)]
pub enum TfsError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Change-set loading errors.
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Report delivery errors.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {message}")]
    Terminal {
        /// Description of the terminal failure.
        message: String,
    },

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },
}

/// Change-set loading errors.
///
/// All of these are fatal at load time: no buckets are built and no
/// partial rendering happens once one of them is raised.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The plan file does not exist.
    #[error("File does not exist: {path}")]
    FileNotFound {
        /// Path to the missing plan file.
        path: PathBuf,
    },

    /// The plan file exists but could not be read.
    #[error("Failed to read plan {path}: {message}")]
    ReadFailed {
        /// Path to the plan file.
        path: PathBuf,
        /// Description of the read failure.
        message: String,
    },

    /// The change-set JSON does not have the expected shape.
    #[error("Failed to parse plan JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },
}

/// Report delivery errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The uploader was configured with unusable values.
    #[error("Invalid upload settings: {message}")]
    InvalidSettings {
        /// Description of the problem.
        message: String,
    },

    /// Transferring the bytes to the object store failed.
    #[error("Failed to upload {key}: {message}")]
    TransferFailed {
        /// Object key being written.
        key: String,
        /// Description of the failure.
        message: String,
    },

    /// The object was stored but no access link could be produced.
    #[error("Failed to sign url for {key}: {message}")]
    SigningFailed {
        /// Object key being signed.
        key: String,
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias for tfs operations.
pub type Result<T> = std::result::Result<T, TfsError>;

impl TfsError {
    /// Creates a terminal error with the given message.
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    /// Returns true if the error happened before any input was accepted,
    /// i.e. the user can fix it by correcting flags or files.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Plan(_))
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl PlanError {
    /// Creates a parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }
}

impl UploadError {
    /// Creates a transfer error for the given object key.
    #[must_use]
    pub fn transfer(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransferFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a signing error for the given object key.
    #[must_use]
    pub fn signing(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SigningFailed {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_error_wraps_into_tfs_error() {
        let err: TfsError = PlanError::parse("expected value at line 1").into();
        assert!(err.is_input_error());
        assert_eq!(
            err.to_string(),
            "Plan error: Failed to parse plan JSON: expected value at line 1"
        );
    }

    #[test]
    fn test_upload_error_is_not_input_error() {
        let err: TfsError = UploadError::transfer("tfs-plan-1.html", "access denied").into();
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("tfs-plan-1.html"));
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = ConfigError::validation("must be at least 1 second", "upload.expiration_secs");
        assert!(matches!(
            &err,
            ConfigError::ValidationError { field: Some(f), .. } if f == "upload.expiration_secs"
        ));
        assert!(TfsError::from(err).is_input_error());
    }
}
