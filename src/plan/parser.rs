//! Change-set parser.
//!
//! Turns the planning tool's JSON output into a [`PlanDocument`]. Any shape
//! mismatch is fatal: the caller gets a single diagnostic and nothing is
//! rendered.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{PlanError, Result};

use super::change::{PlanDocument, RawPlan};

/// Parser for change-set JSON.
#[derive(Debug, Default)]
pub struct PlanParser;

impl PlanParser {
    /// Creates a new plan parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses a change-set from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or does not have the
    /// expected shape.
    pub fn parse_json(&self, content: &str) -> Result<PlanDocument> {
        debug!("Parsing plan JSON ({} bytes)", content.len());

        let raw: RawPlan = serde_json::from_str(content)
            .map_err(|e| PlanError::parse(format!("{e}")))?;

        let document = PlanDocument::from(raw);
        debug!(
            "Parsed {} resource changes",
            document.resource_changes.len()
        );
        Ok(document)
    }

    /// Loads and parses a change-set JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or malformed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<PlanDocument> {
        let path = path.as_ref();
        info!("Loading plan JSON from: {}", path.display());

        if !path.exists() {
            return Err(PlanError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| PlanError::ReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        self.parse_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfsError;
    use crate::plan::value::PlanValue;

    #[test]
    fn test_parse_plan() {
        let json = r#"{
            "format_version": "1.2",
            "resource_changes": [
                {
                    "address": "res.create",
                    "type": "res",
                    "name": "create",
                    "change": {"actions": ["create"], "before": null, "after": {"size": 10.0}}
                },
                {
                    "address": "res.replace",
                    "type": "res",
                    "name": "replace",
                    "change": {"actions": ["delete", "create"]}
                }
            ]
        }"#;

        let plan = PlanParser::new().parse_json(json).unwrap();
        assert_eq!(plan.resource_changes.len(), 2);

        let first = &plan.resource_changes[0];
        assert_eq!(first.address, "res.create");
        assert_eq!(first.resource_type, "res");
        assert_eq!(
            first.attributes["size"].after,
            Some(PlanValue::Number("10.0".to_string()))
        );
        assert!(plan.resource_changes[1].is_replace());
    }

    #[test]
    fn test_missing_resource_changes_is_empty_plan() {
        let plan = PlanParser::new().parse_json(r#"{"format_version": "1.2"}"#).unwrap();
        assert!(plan.resource_changes.is_empty());
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = PlanParser::new().parse_json("INVALID JSON").unwrap_err();
        assert!(matches!(err, TfsError::Plan(PlanError::ParseError { .. })));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let parser = PlanParser::new();
        assert!(parser.parse_json(r#"{"resource_changes": {}}"#).is_err());
        assert!(
            parser
                .parse_json(r#"{"resource_changes": [{"address": "a.b", "type": "a", "name": "b"}]}"#)
                .is_err()
        );
        assert!(
            parser
                .parse_json(
                    r#"{"resource_changes": [{"address": "a.b", "type": "a", "name": "b",
                        "change": {"actions": ["create"], "after": [1, 2]}}]}"#
                )
                .is_err()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlanParser::new()
            .load_file("/definitely/not/here.json")
            .unwrap_err();
        assert!(matches!(err, TfsError::Plan(PlanError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, r#"{"resource_changes": []}"#).unwrap();

        let plan = PlanParser::new().load_file(&path).unwrap();
        assert!(plan.resource_changes.is_empty());
    }
}
