//! Capability variants
//!
//! A capability is the policy half of a grant: it names the one action kind it
//! governs and decides, for a concrete action, whether to admit it and what it
//! leaves behind. New policies are added as variants; every match over
//! [`Capability`] is exhaustive so a new variant cannot be half-wired.

mod generic;
mod send;

pub use generic::GenericCapability;
pub use send::SendCapability;

use serde::{Deserialize, Serialize};
use warden_core::{Action, ActionKind, Timestamp, WardenError, WardenResult};

/// Serialized discriminant of [`SendCapability`]
pub const SEND_CAPABILITY_TYPE_URL: &str = "/warden.authorization.SendCapability";

/// Serialized discriminant of [`GenericCapability`]
pub const GENERIC_CAPABILITY_TYPE_URL: &str = "/warden.authorization.GenericCapability";

/// Every discriminant a stored capability may carry
pub const CAPABILITY_TYPE_URLS: &[&str] = &[SEND_CAPABILITY_TYPE_URL, GENERIC_CAPABILITY_TYPE_URL];

/// Closed set of grant policies.
///
/// The serde variant names are the type URLs above, so a stored record
/// decodes to the right variant or fails with a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    /// Spend-limited native transfers
    #[serde(rename = "/warden.authorization.SendCapability")]
    Send(SendCapability),

    /// Any single action kind, optionally use-limited
    #[serde(rename = "/warden.authorization.GenericCapability")]
    Generic(GenericCapability),
}

impl Capability {
    /// The action kind this capability governs; part of the grant key
    pub fn target_action_kind(&self) -> ActionKind {
        match self {
            Capability::Send(_) => SendCapability::target_action_kind(),
            Capability::Generic(generic) => generic.action.clone(),
        }
    }

    /// Decide whether `action` falls within this capability at `now`.
    ///
    /// Pure: the decision carries any replacement state, and the caller
    /// applies it.
    pub fn accept(&self, action: &dyn Action, now: Timestamp) -> AcceptDecision {
        match self {
            Capability::Send(send) => send.accept(action, now),
            Capability::Generic(generic) => generic.accept(action, now),
        }
    }

    /// Reject capabilities that could never admit an action
    pub fn validate(&self) -> WardenResult<()> {
        match self {
            Capability::Send(_) => Ok(()),
            Capability::Generic(generic) if generic.remaining_uses == Some(0) => Err(
                WardenError::invalid(format!("capability for {} has no uses left", generic.action)),
            ),
            Capability::Generic(_) => Ok(()),
        }
    }

    /// Serialized discriminant of this variant
    pub fn type_url(&self) -> &'static str {
        match self {
            Capability::Send(_) => SEND_CAPABILITY_TYPE_URL,
            Capability::Generic(_) => GENERIC_CAPABILITY_TYPE_URL,
        }
    }
}

impl From<SendCapability> for Capability {
    fn from(send: SendCapability) -> Self {
        Capability::Send(send)
    }
}

impl From<GenericCapability> for Capability {
    fn from(generic: GenericCapability) -> Self {
        Capability::Generic(generic)
    }
}

/// Outcome of [`Capability::accept`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptDecision {
    /// The action is outside the capability
    Declined,
    /// Admitted; the grant is unchanged
    Consumed,
    /// Admitted; the grant shrinks to the carried state
    Replace(Capability),
    /// Admitted; nothing is left and the grant must be removed
    Exhausted,
}

impl AcceptDecision {
    /// Whether the action is admitted
    pub fn allowed(&self) -> bool {
        !matches!(self, AcceptDecision::Declined)
    }

    /// State to store in place of the current capability, if any
    pub fn replacement(&self) -> Option<&Capability> {
        match self {
            AcceptDecision::Replace(next) => Some(next),
            _ => None,
        }
    }

    /// Whether the grant is used up
    pub fn exhausted(&self) -> bool {
        matches!(self, AcceptDecision::Exhausted)
    }
}

/// Stored grant: a capability and its optional expiration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Policy governing the grant
    pub capability: Capability,
    /// Block time after which the grant is treated as absent
    pub expiration: Option<Timestamp>,
}

impl Grant {
    /// Create a grant record
    pub fn new(capability: Capability, expiration: Option<Timestamp>) -> Self {
        Self {
            capability,
            expiration,
        }
    }

    /// True when the expiration is set and strictly before `now`
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expiration.is_some_and(|exp| exp.is_before(now))
    }
}
