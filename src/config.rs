//! Configuration System
//!
//! Layered configuration: merge-policy defaults, then the global config file,
//! then workspace config files, then `XO__`-prefixed environment variables.

use crate::auth::Actor;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::options::Overrides;
use crate::types::PostTypeConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

mod merge;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XoConfig {
    /// Storage paths
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Settings blob; its `overrides` table takes precedence over stored options
    #[serde(default)]
    pub settings: serde_json::Value,

    /// Front-end project descriptor used to derive option defaults
    #[serde(default)]
    pub project_config: Option<PathBuf>,

    /// Custom post types registered after the built-ins
    #[serde(default)]
    pub post_types: Vec<PostTypeConfig>,

    /// Actor on whose behalf CLI requests run
    #[serde(default)]
    pub actor: Actor,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database directory, relative to the workspace root unless absolute
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".xo/store")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

impl StorageConfig {
    /// Absolute store path for the given workspace
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        if self.store_path.is_absolute() {
            self.store_path.clone()
        } else {
            workspace_root.join(&self.store_path)
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    PostType(String, String),
    Storage(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::PostType(name, msg) => write!(f, "Post type '{}': {}", name, msg),
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl XoConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.storage.store_path.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Store path cannot be empty".to_string(),
            ));
        }

        if self.logging.format != "json" && self.logging.format != "text" {
            errors.push(ValidationError::Logging(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.logging.format
            )));
        }

        let mut seen = HashSet::new();
        for post_type in &self.post_types {
            if post_type.name.trim().is_empty() {
                errors.push(ValidationError::PostType(
                    post_type.label.clone(),
                    "Name cannot be empty".to_string(),
                ));
            } else if !seen.insert(post_type.name.as_str()) {
                errors.push(ValidationError::PostType(
                    post_type.name.clone(),
                    "Registered more than once".to_string(),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Override map: `XO_SETTINGS` when set, else the `settings` table.
    pub fn overrides(&self) -> Overrides {
        Overrides::from_env().unwrap_or_else(|| Overrides::from_settings(&self.settings))
    }

    /// Project descriptor path resolved against the workspace root
    pub fn project_config_path(&self, workspace_root: &Path) -> Option<PathBuf> {
        self.project_config.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                workspace_root.join(path)
            }
        })
    }
}

/// Loads `XoConfig` from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    pub fn load(workspace_root: &Path) -> Result<XoConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder
            .add_source(Environment::with_prefix("XO").separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load configuration from a single file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<XoConfig, ApiError> {
        let config = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Global config file location
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }

    /// Defaults only
    pub fn defaults() -> Result<XoConfig, ApiError> {
        let config: Config = merge::merge_policy::builder_with_defaults()?.build()?;
        Ok(config.try_deserialize()?)
    }
}
