//! Spend-limited transfer capability

use super::{AcceptDecision, Capability};
use serde::{Deserialize, Serialize};
use warden_core::{Action, ActionKind, Coins, Timestamp, Transfer};

/// Lets the operator send up to `spend_limit` from the authorizer.
///
/// An empty limit means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendCapability {
    /// Remaining amount the operator may send
    pub spend_limit: Coins,
}

impl SendCapability {
    /// Capability with the given remaining limit
    pub fn new(spend_limit: Coins) -> Self {
        Self { spend_limit }
    }

    /// Always the native transfer kind
    pub fn target_action_kind() -> ActionKind {
        Transfer::action_kind()
    }

    pub(crate) fn accept(&self, action: &dyn Action, _now: Timestamp) -> AcceptDecision {
        let Some(transfer) = action.as_transfer() else {
            return AcceptDecision::Declined;
        };
        if self.spend_limit.is_empty() {
            return AcceptDecision::Consumed;
        }
        match self.spend_limit.safe_sub(&transfer.amount) {
            None => AcceptDecision::Declined,
            Some(left) if left.is_zero() => AcceptDecision::Exhausted,
            Some(left) => AcceptDecision::Replace(Capability::Send(SendCapability::new(left))),
        }
    }
}
