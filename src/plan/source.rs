//! Retrieval of change-set JSON for a plan file.
//!
//! A plan file is either the planning tool's binary plan or its JSON
//! rendering. The tool is asked to render the file first; when that is not
//! possible the file itself is read as JSON.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::error::{PlanError, Result};

use super::change::PlanDocument;
use super::parser::PlanParser;

/// Default planning tool binary.
pub const DEFAULT_TERRAFORM_BINARY: &str = "terraform";

/// Source of change-set JSON.
#[derive(Debug, Clone)]
pub struct PlanSource {
    /// Planning tool binary used for `show -json`.
    binary: PathBuf,
    /// Skip the tool and read the file as JSON directly.
    raw_json: bool,
}

impl Default for PlanSource {
    fn default() -> Self {
        Self::new(DEFAULT_TERRAFORM_BINARY)
    }
}

impl PlanSource {
    /// Creates a source that renders plan files with the given binary.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            raw_json: false,
        }
    }

    /// Reads plan files as JSON without invoking the planning tool.
    #[must_use]
    pub const fn with_raw_json(mut self, raw_json: bool) -> Self {
        self.raw_json = raw_json;
        self
    }

    /// Returns the JSON text for a plan file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    pub fn fetch(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PlanError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        if !self.raw_json {
            match self.show_json(path) {
                Ok(json) => return Ok(json),
                Err(reason) => {
                    warn!(
                        "'{} show -json' failed ({reason}), reading {} as JSON",
                        self.binary.display(),
                        path.display()
                    );
                }
            }
        }

        debug!("Reading plan file directly: {}", path.display());
        std::fs::read_to_string(path).map_err(|e| {
            PlanError::ReadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Fetches and parses a plan file.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be obtained or is malformed.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<PlanDocument> {
        let json = self.fetch(path)?;
        PlanParser::new().parse_json(&json)
    }

    /// Runs `<binary> show -json <path>` and returns its stdout.
    fn show_json(&self, path: &Path) -> std::result::Result<String, String> {
        info!("Running '{} show -json {}'", self.binary.display(), path.display());

        let output = Command::new(&self.binary)
            .arg("show")
            .arg("-json")
            .arg(path)
            .output()
            .map_err(|e| e.to_string())?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("{}: {}", output.status, stderr.trim()));
        }

        String::from_utf8(output.stdout).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfsError;
    use tempfile::TempDir;

    const PLAN: &str = r#"{"resource_changes": [
        {"address": "a.b", "type": "a", "name": "b", "change": {"actions": ["create"]}}
    ]}"#;

    fn write_plan(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("plan.json");
        std::fs::write(&path, content).expect("Failed to write plan");
        path
    }

    #[test]
    fn test_falls_back_to_file_when_tool_is_missing() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_plan(&dir, PLAN);

        let source = PlanSource::new("tfs-test-no-such-binary");
        let plan = source.load(&path).expect("Failed to load plan");
        assert_eq!(plan.resource_changes.len(), 1);
    }

    #[test]
    fn test_raw_json_reads_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_plan(&dir, PLAN);

        let json = PlanSource::default()
            .with_raw_json(true)
            .fetch(&path)
            .expect("Failed to fetch plan");
        assert_eq!(json, PLAN);
    }

    #[test]
    fn test_missing_file() {
        let err = PlanSource::default()
            .load("/definitely/not/here.tfplan")
            .unwrap_err();
        assert!(matches!(err, TfsError::Plan(PlanError::FileNotFound { .. })));
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_plan(&dir, "not json at all");

        let err = PlanSource::default()
            .with_raw_json(true)
            .load(&path)
            .unwrap_err();
        assert!(matches!(err, TfsError::Plan(PlanError::ParseError { .. })));
    }
}
