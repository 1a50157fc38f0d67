//! Capability for an arbitrary action kind

use super::{AcceptDecision, Capability};
use serde::{Deserialize, Serialize};
use warden_core::{Action, ActionKind, Timestamp};

/// Admits any action of exactly `action`, optionally a limited number of times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericCapability {
    /// The governed action kind
    pub action: ActionKind,
    /// Uses left; `None` is unlimited
    pub remaining_uses: Option<u32>,
}

impl GenericCapability {
    /// Capability for `action` with the given use budget
    pub fn new(action: ActionKind, remaining_uses: Option<u32>) -> Self {
        Self {
            action,
            remaining_uses,
        }
    }

    pub(crate) fn accept(&self, action: &dyn Action, _now: Timestamp) -> AcceptDecision {
        if action.route() != self.action.route || action.kind() != self.action.kind {
            return AcceptDecision::Declined;
        }
        match self.remaining_uses {
            None => AcceptDecision::Consumed,
            Some(0) => AcceptDecision::Declined,
            Some(1) => AcceptDecision::Exhausted,
            Some(n) => AcceptDecision::Replace(Capability::Generic(GenericCapability::new(
                self.action.clone(),
                Some(n - 1),
            ))),
        }
    }
}
