//! Configuration for the delegation module

pub mod traits;
pub mod validation;

pub use traits::{WardenConfig, ENV_PREFIX};
pub use validation::{ConfigValidator, ValidationError, ValidationResult};

use crate::WardenError;
use serde::{Deserialize, Serialize};

/// Default module name, also the route of delegation requests
pub const DEFAULT_MODULE_NAME: &str = "delegation";

/// Delegation module configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegationConfig {
    /// Module label carried by every keeper log span
    pub module_name: String,
    /// Largest batch `dispatch_actions` accepts; `None` means unbounded
    pub max_dispatch_actions: Option<usize>,
}

impl Default for DelegationConfig {
    fn default() -> Self {
        Self {
            module_name: DEFAULT_MODULE_NAME.to_string(),
            max_dispatch_actions: None,
        }
    }
}

impl DelegationConfig {
    /// Set the batch size limit
    pub fn with_max_dispatch_actions(mut self, max: usize) -> Self {
        self.max_dispatch_actions = Some(max);
        self
    }
}

impl WardenConfig for DelegationConfig {
    fn merge_with_vars<I>(&mut self, vars: I) -> Result<(), WardenError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "MODULE_NAME" => self.module_name = value,
                "MAX_DISPATCH_ACTIONS" => {
                    let max = value.parse().map_err(|_| {
                        WardenError::invalid(format!(
                            "Invalid number in {ENV_PREFIX}MAX_DISPATCH_ACTIONS: {value}"
                        ))
                    })?;
                    self.max_dispatch_actions = Some(max);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn merge_with(&mut self, other: &Self) -> Result<(), WardenError> {
        let defaults = Self::default();
        if other.module_name != defaults.module_name {
            self.module_name = other.module_name.clone();
        }
        if other.max_dispatch_actions.is_some() {
            self.max_dispatch_actions = other.max_dispatch_actions;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), WardenError> {
        let mut validator = ConfigValidator::new();
        validator.non_empty("module_name", &self.module_name).custom(
            "module_name",
            self.module_name.as_str(),
            |name: &str| !name.contains('/'),
            "must not contain '/'",
        );
        if let Some(max) = self.max_dispatch_actions {
            validator.at_least("max_dispatch_actions", max as u64, 1);
        }
        validator.result().map_err(WardenError::from)
    }
}
