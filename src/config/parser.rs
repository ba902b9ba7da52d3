//! Configuration parser for loading settings files.
//!
//! Precedence, lowest first: built-in defaults, the settings file,
//! `TFS_*` environment variables, command-line flags. Flags are applied by
//! the CLI after loading.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result, TfsError};

use super::settings::Settings;

/// Environment variable overriding `terraform.binary`.
pub const ENV_TERRAFORM_BIN: &str = "TFS_TERRAFORM_BIN";
/// Environment variable overriding `upload.bucket`.
pub const ENV_S3_BUCKET: &str = "TFS_S3_BUCKET";
/// Environment variable overriding `upload.prefix`.
pub const ENV_S3_PREFIX: &str = "TFS_S3_PREFIX";
/// Environment variable overriding `upload.region`.
pub const ENV_REGION: &str = "TFS_REGION";
/// Environment variable overriding `upload.expiration_secs`.
pub const ENV_EXPIRATION_SECS: &str = "TFS_EXPIRATION_SECS";

/// Configuration file names searched for, in order.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[".tfs.yaml", "tfs.yaml"];

/// Configuration parser for loading settings.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Directory the search starts from (defaults to the working directory).
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the directory the file search and `.env` lookup start from.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is
    /// not valid YAML.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to read file: {e}"),
            location: Some(path.display().to_string()),
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses settings from a YAML string. Blank input yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<Settings> {
        debug!("Parsing YAML configuration");

        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_yaml::from_str(content).map_err(|e| {
            ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            }
            .into()
        })
    }

    /// Resolves, loads and validates the effective settings.
    ///
    /// An explicit path must exist. Without one, the project files are
    /// searched upward from the base path, then the per-user file; if
    /// nothing is found the defaults are used. Environment overrides are
    /// applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be loaded, an override is malformed,
    /// or the result fails validation.
    pub fn load(&self, explicit: Option<&Path>) -> Result<Settings> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let start = match &self.base_path {
                    Some(base) => base.clone(),
                    None => std::env::current_dir()?,
                };
                find_config_file(&start).or_else(|| user_config_file().filter(|p| p.exists()))
            }
        };

        let mut settings = match path {
            Some(path) => self.load_file(path)?,
            None => {
                debug!("No configuration file found, using defaults");
                Settings::default()
            }
        };

        apply_env_overrides(&mut settings, |name| std::env::var(name).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to load .env file: {e}"),
                location: Some(env_path.display().to_string()),
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Applies `TFS_*` overrides using `lookup` to read variables.
///
/// # Errors
///
/// Returns an error if `TFS_EXPIRATION_SECS` is not a whole number.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(binary) = lookup(ENV_TERRAFORM_BIN) {
        debug!("Overriding terraform.binary from environment");
        settings.terraform.binary = binary;
    }

    if let Some(bucket) = lookup(ENV_S3_BUCKET) {
        debug!("Overriding upload.bucket from environment");
        settings.upload.bucket = Some(bucket);
    }

    if let Some(prefix) = lookup(ENV_S3_PREFIX) {
        debug!("Overriding upload.prefix from environment");
        settings.upload.prefix = Some(prefix);
    }

    if let Some(region) = lookup(ENV_REGION) {
        debug!("Overriding upload.region from environment");
        settings.upload.region = Some(region);
    }

    if let Some(secs) = lookup(ENV_EXPIRATION_SECS) {
        debug!("Overriding upload.expiration_secs from environment");
        settings.upload.expiration_secs = secs.trim().parse().map_err(|_| {
            TfsError::from(ConfigError::validation(
                format!("{ENV_EXPIRATION_SECS} must be a whole number of seconds, got '{secs}'"),
                "upload.expiration_secs",
            ))
        })?;
    }

    Ok(())
}

/// Finds a project configuration file in `start_dir` or its parents.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.is_file() {
                info!("Found configuration file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Returns the per-user configuration path (`<config dir>/tfs/config.yaml`).
#[must_use]
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tfs").join("config.yaml"))
}
