//! Configuration module for tfs.
//!
//! This module handles all configuration-related functionality:
//! - Settings types and their defaults
//! - Loading `.tfs.yaml` / `tfs.yaml` or the per-user settings file
//! - `TFS_*` environment overrides and validation

mod parser;
mod settings;

pub use parser::{
    ConfigParser, DEFAULT_CONFIG_FILES, ENV_EXPIRATION_SECS, ENV_REGION, ENV_S3_BUCKET,
    ENV_S3_PREFIX, ENV_TERRAFORM_BIN, apply_env_overrides, find_config_file, user_config_file,
};
pub use settings::{
    DEFAULT_DOCUMENT_OUTPUT, DocumentSettings, Settings, TerraformSettings, UploadSettings,
};
