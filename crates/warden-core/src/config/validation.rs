//! Configuration validation utilities

use crate::WardenError;
use std::fmt;

/// Configuration validation result
pub type ValidationResult = Result<(), ValidationError>;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value is required but missing or empty
    Required { field: String },
    /// Value is below the accepted minimum
    TooSmall { field: String, min: u64, actual: u64 },
    /// Custom validation failed
    Custom { field: String, message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required { field } => {
                write!(f, "Field '{field}' is required but missing")
            }
            ValidationError::TooSmall { field, min, actual } => {
                write!(f, "Field '{field}' must be at least {min} (got {actual})")
            }
            ValidationError::Custom { field, message } => {
                write!(f, "Field '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for WardenError {
    fn from(err: ValidationError) -> Self {
        WardenError::invalid(err.to_string())
    }
}

/// Accumulates validation failures; [`ConfigValidator::result`] reports the first.
#[derive(Debug, Default)]
pub struct ConfigValidator {
    errors: Vec<ValidationError>,
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that a string is non-empty
    pub fn non_empty(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::Required {
                field: field.to_string(),
            });
        }
        self
    }

    /// Validate that a number is at least `min`
    pub fn at_least(&mut self, field: &str, value: u64, min: u64) -> &mut Self {
        if value < min {
            self.errors.push(ValidationError::TooSmall {
                field: field.to_string(),
                min,
                actual: value,
            });
        }
        self
    }

    /// Validate using a custom predicate
    pub fn custom<T, F>(&mut self, field: &str, value: &T, predicate: F, message: &str) -> &mut Self
    where
        T: ?Sized,
        F: FnOnce(&T) -> bool,
    {
        if !predicate(value) {
            self.errors.push(ValidationError::Custom {
                field: field.to_string(),
                message: message.to_string(),
            });
        }
        self
    }

    /// First validation failure, if any
    pub fn result(self) -> ValidationResult {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every validation failure
    pub fn all_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}
