//! Action descriptors
//!
//! Actions are executed elsewhere. The delegation engine only needs to know
//! where an action is routed, what kind it is, and who must sign it.

use crate::{Address, Coins};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `(route, kind)` pair identifying one action type.
///
/// Grants are scoped to exactly one action kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionKind {
    /// Module route the action is dispatched to
    pub route: String,
    /// Action type within the route
    pub kind: String,
}

impl ActionKind {
    /// Create an action kind
    pub fn new(route: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            kind: kind.into(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.route, self.kind)
    }
}

/// An action submitted to the ledger
pub trait Action: fmt::Debug {
    /// Module route the action is dispatched to
    fn route(&self) -> &str;

    /// Action type within the route
    fn kind(&self) -> &str;

    /// Accounts whose signature the action requires
    fn signers(&self) -> Vec<Address>;

    /// The `(route, kind)` pair of this action
    fn action_kind(&self) -> ActionKind {
        ActionKind::new(self.route(), self.kind())
    }

    /// This action viewed as a native transfer, if it is one
    fn as_transfer(&self) -> Option<&Transfer> {
        None
    }
}

/// Native currency transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Sending account, the sole signer
    pub from: Address,
    /// Receiving account
    pub to: Address,
    /// Amount moved
    pub amount: Coins,
}

impl Transfer {
    /// Route of native transfers
    pub const ROUTE: &'static str = "bank";
    /// Kind of native transfers
    pub const KIND: &'static str = "send";

    /// Create a transfer
    pub fn new(from: Address, to: Address, amount: Coins) -> Self {
        Self { from, to, amount }
    }

    /// The action kind every transfer carries
    pub fn action_kind() -> ActionKind {
        ActionKind::new(Self::ROUTE, Self::KIND)
    }
}

impl Action for Transfer {
    fn route(&self) -> &str {
        Self::ROUTE
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn signers(&self) -> Vec<Address> {
        vec![self.from]
    }

    fn as_transfer(&self) -> Option<&Transfer> {
        Some(self)
    }
}
