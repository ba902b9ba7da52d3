//! Settings types for the `tfs` configuration file.
//!
//! Every field has a default, so an empty or missing file is a valid
//! configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::plan::DEFAULT_TERRAFORM_BINARY;
use crate::upload::{DEFAULT_EXPIRATION, MAX_EXPIRATION, MIN_EXPIRATION};

/// Default path of the generated document.
pub const DEFAULT_DOCUMENT_OUTPUT: &str = "tfs.html";

/// Root settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Planning tool settings.
    #[serde(default)]
    pub terraform: TerraformSettings,
    /// Document generation settings.
    #[serde(default)]
    pub document: DocumentSettings,
    /// Artifact upload settings.
    #[serde(default)]
    pub upload: UploadSettings,
}

/// Planning tool settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerraformSettings {
    /// Binary used for `show -json`.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Read plan files as JSON without invoking the binary.
    #[serde(default)]
    pub raw_json: bool,
}

/// Document generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSettings {
    /// Where the HTML document is written.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

/// Artifact upload settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadSettings {
    /// Target S3 bucket. No upload happens without one.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Key prefix inside the bucket.
    #[serde(default)]
    pub prefix: Option<String>,
    /// AWS region (uses the AWS default chain if not specified).
    #[serde(default)]
    pub region: Option<String>,
    /// Lifetime of the shared link in seconds.
    #[serde(default = "default_expiration_secs")]
    pub expiration_secs: u64,
}

fn default_binary() -> String {
    DEFAULT_TERRAFORM_BINARY.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENT_OUTPUT)
}

const fn default_expiration_secs() -> u64 {
    DEFAULT_EXPIRATION.as_secs()
}

impl Default for TerraformSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            raw_json: false,
        }
    }
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            bucket: None,
            prefix: None,
            region: None,
            expiration_secs: default_expiration_secs(),
        }
    }
}

impl UploadSettings {
    /// Returns the link lifetime.
    #[must_use]
    pub const fn expiration(&self) -> Duration {
        Duration::from_secs(self.expiration_secs)
    }

    /// Returns the bucket if uploading is enabled.
    #[must_use]
    pub fn target_bucket(&self) -> Option<&str> {
        self.bucket.as_deref().filter(|b| !b.trim().is_empty())
    }
}

impl Settings {
    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.terraform.binary.trim().is_empty() {
            return Err(ConfigError::validation(
                "terraform binary must not be empty",
                "terraform.binary",
            )
            .into());
        }

        if self.document.output.as_os_str().is_empty() {
            return Err(
                ConfigError::validation("output path must not be empty", "document.output").into(),
            );
        }

        let expiration = self.upload.expiration();
        if expiration < MIN_EXPIRATION || expiration > MAX_EXPIRATION {
            return Err(ConfigError::validation(
                format!(
                    "expiration must be between {} and {} seconds, got {}",
                    MIN_EXPIRATION.as_secs(),
                    MAX_EXPIRATION.as_secs(),
                    self.upload.expiration_secs
                ),
                "upload.expiration_secs",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfsError;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.terraform.binary, "terraform");
        assert!(!settings.terraform.raw_json);
        assert_eq!(settings.document.output, PathBuf::from("tfs.html"));
        assert_eq!(settings.upload.expiration_secs, 900);
        assert!(settings.upload.target_bucket().is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_errors_name_the_field() {
        let mut settings = Settings::default();
        settings.upload.expiration_secs = 0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            TfsError::Config(ConfigError::ValidationError { field: Some(ref f), .. })
                if f == "upload.expiration_secs"
        ));

        let mut settings = Settings::default();
        settings.terraform.binary = String::from("  ");
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            TfsError::Config(ConfigError::ValidationError { field: Some(ref f), .. })
                if f == "terraform.binary"
        ));
    }

    #[test]
    fn test_expiration_upper_bound() {
        let mut settings = Settings::default();
        settings.upload.expiration_secs = 7 * 24 * 60 * 60;
        assert!(settings.validate().is_ok());
        settings.upload.expiration_secs += 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_blank_bucket_disables_upload() {
        let mut upload = UploadSettings::default();
        upload.bucket = Some(String::from(" "));
        assert!(upload.target_bucket().is_none());
        upload.bucket = Some(String::from("reports"));
        assert_eq!(upload.target_bucket(), Some("reports"));
    }
}
