//! Authorization errors
//!
//! Uses the unified [`WardenError`] from warden-core. [`Denial`] keeps the
//! reason a delegated action was refused for logging; callers only ever see
//! [`WardenError::Unauthorized`].

pub use warden_core::{WardenError, WardenResult};

/// Why a delegated action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    /// No grant exists for the key
    #[error("no grant for this action")]
    NoGrant,
    /// The grant existed but its expiration has passed
    #[error("grant has expired")]
    Expired,
    /// The capability refused the action
    #[error("capability declined the action")]
    Declined,
}

impl From<Denial> for WardenError {
    fn from(_: Denial) -> Self {
        WardenError::unauthorized("authorization not found")
    }
}
