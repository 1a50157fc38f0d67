//! Core configuration traits

use crate::WardenError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "WARDEN_";

/// Core trait for Warden configuration types
pub trait WardenConfig: Clone + Default + DeserializeOwned + Send + Sync + 'static {
    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Load configuration from a `.toml` or `.json` file
    fn load_from_file(path: &Path) -> Result<Self, WardenError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WardenError::invalid(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| WardenError::invalid(format!("Invalid TOML: {e}"))),
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| WardenError::invalid(format!("Invalid JSON: {e}"))),
            _ => Err(WardenError::invalid(format!(
                "Unsupported config file format: {}",
                path.display()
            ))),
        }
    }

    /// Apply overrides from `(name, value)` pairs; names carry [`ENV_PREFIX`]
    fn merge_with_vars<I>(&mut self, vars: I) -> Result<(), WardenError>
    where
        I: IntoIterator<Item = (String, String)>;

    /// Merge with the process environment
    fn merge_with_env(&mut self) -> Result<(), WardenError> {
        self.merge_with_vars(std::env::vars())
    }

    /// Merge non-default values from another configuration
    fn merge_with(&mut self, other: &Self) -> Result<(), WardenError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), WardenError>;

    /// Defaults, then the optional file, then the environment, then validation
    fn load(path: Option<&Path>) -> Result<Self, WardenError> {
        let mut config = Self::defaults();
        if let Some(path) = path {
            let from_file = Self::load_from_file(path)?;
            config.merge_with(&from_file)?;
        }
        config.merge_with_env()?;
        config.validate()?;
        tracing::debug!(path = ?path, "configuration loaded");
        Ok(config)
    }
}
