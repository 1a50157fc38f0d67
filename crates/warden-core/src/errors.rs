//! Unified error system for Warden
//!
//! A single error type shared by every crate in the workspace. Callers match
//! on the variant; the message is for humans and logs.

use serde::{Deserialize, Serialize};

/// Unified error type for all Warden operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WardenError {
    /// Unrecognized request shape, or an action the dispatcher cannot handle
    #[error("Unknown request: {message}")]
    UnknownRequest {
        /// Error message describing the rejected request
        message: String,
    },

    /// No matching grant, an expired grant, or a grant that declined the action
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error message describing the authorization failure
        message: String,
    },

    /// A stored record or key could not be decoded
    #[error("Decode error: {message}")]
    Decode {
        /// Error message describing the decoding failure
        message: String,
    },

    /// A record could not be encoded for storage
    #[error("Encode error: {message}")]
    Encode {
        /// Error message describing the encoding failure
        message: String,
    },

    /// The host store reported a failure
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// Invalid configuration or malformed input
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Error returned by the external action router
    #[error("Routing error on {route}: {message}")]
    Routing {
        /// Route of the action that failed
        route: String,
        /// Error message reported by the router
        message: String,
    },
}

impl WardenError {
    /// Create an unknown request error
    pub fn unknown_request(message: impl Into<String>) -> Self {
        Self::UnknownRequest {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a routing error attributed to `route`
    pub fn routing(route: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Routing {
            route: route.into(),
            message: message.into(),
        }
    }

    /// True for errors that mean "the operator may not do this"
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Standard Result type for Warden operations
pub type Result<T> = std::result::Result<T, WardenError>;
