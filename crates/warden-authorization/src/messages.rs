//! Inbound delegation requests
//!
//! Each request maps to one keeper operation. Requests are themselves
//! actions routed to the delegation module and signed by the account whose
//! authority they exercise.

use crate::allowance::FeeAllowance;
use crate::capability::Capability;
use warden_core::config::DEFAULT_MODULE_NAME;
use warden_core::{Action, ActionKind, Address, Timestamp, WardenError, WardenResult};

/// Kind of [`MsgAuthorize`]
pub const KIND_AUTHORIZE: &str = "authorize";
/// Kind of [`MsgRevoke`]
pub const KIND_REVOKE: &str = "revoke";
/// Kind of [`MsgAuthorizeFeeAllowance`]
pub const KIND_AUTHORIZE_FEE_ALLOWANCE: &str = "authorize-fee-allowance";
/// Kind of [`MsgRevokeFeeAllowance`]
pub const KIND_REVOKE_FEE_ALLOWANCE: &str = "revoke-fee-allowance";
/// Kind of [`MsgExecAuthorized`]
pub const KIND_EXEC_AUTHORIZED: &str = "exec-authorized";

fn distinct_parties(operator: &Address, authorizer: &Address) -> WardenResult<()> {
    if operator == authorizer {
        return Err(WardenError::invalid(
            "operator and authorizer must be different accounts",
        ));
    }
    Ok(())
}

/// Grant `capability` to `operator`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgAuthorize {
    /// Granting account; signs the request
    pub authorizer: Address,
    /// Receiving account
    pub operator: Address,
    /// Policy to grant
    pub capability: Capability,
    /// Optional expiration of the grant
    pub expiration: Option<Timestamp>,
}

/// Withdraw the grant for `action`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgRevoke {
    /// Granting account; signs the request
    pub authorizer: Address,
    /// Receiving account
    pub operator: Address,
    /// Action kind whose grant is withdrawn
    pub action: ActionKind,
}

/// Grant `allowance` to `operator`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgAuthorizeFeeAllowance {
    /// Paying account; signs the request
    pub authorizer: Address,
    /// Account allowed to draw
    pub operator: Address,
    /// Budget to grant
    pub allowance: FeeAllowance,
}

/// Withdraw a fee allowance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgRevokeFeeAllowance {
    /// Paying account; signs the request
    pub authorizer: Address,
    /// Account allowed to draw
    pub operator: Address,
}

/// Dispatch `actions` with `signer` as the sender
#[derive(Debug)]
pub struct MsgExecAuthorized {
    /// Operator submitting the batch
    pub signer: Address,
    /// Actions to authorize and route
    pub actions: Vec<Box<dyn Action>>,
}

/// Every request the delegation module accepts
#[derive(Debug)]
pub enum DelegationMsg {
    /// See [`MsgAuthorize`]
    Authorize(MsgAuthorize),
    /// See [`MsgRevoke`]
    Revoke(MsgRevoke),
    /// See [`MsgAuthorizeFeeAllowance`]
    AuthorizeFeeAllowance(MsgAuthorizeFeeAllowance),
    /// See [`MsgRevokeFeeAllowance`]
    RevokeFeeAllowance(MsgRevokeFeeAllowance),
    /// See [`MsgExecAuthorized`]
    ExecAuthorized(MsgExecAuthorized),
}

impl DelegationMsg {
    /// Stateless well-formedness checks; the handler assumes they passed
    pub fn validate_basic(&self) -> WardenResult<()> {
        match self {
            DelegationMsg::Authorize(msg) => {
                distinct_parties(&msg.operator, &msg.authorizer)?;
                msg.capability.validate()
            }
            DelegationMsg::Revoke(msg) => distinct_parties(&msg.operator, &msg.authorizer),
            DelegationMsg::AuthorizeFeeAllowance(msg) => {
                distinct_parties(&msg.operator, &msg.authorizer)?;
                msg.allowance.validate()
            }
            DelegationMsg::RevokeFeeAllowance(msg) => {
                distinct_parties(&msg.operator, &msg.authorizer)
            }
            DelegationMsg::ExecAuthorized(msg) => {
                if msg.actions.is_empty() {
                    return Err(WardenError::invalid("exec request carries no actions"));
                }
                Ok(())
            }
        }
    }
}

impl Action for DelegationMsg {
    fn route(&self) -> &str {
        DEFAULT_MODULE_NAME
    }

    fn kind(&self) -> &str {
        match self {
            DelegationMsg::Authorize(_) => KIND_AUTHORIZE,
            DelegationMsg::Revoke(_) => KIND_REVOKE,
            DelegationMsg::AuthorizeFeeAllowance(_) => KIND_AUTHORIZE_FEE_ALLOWANCE,
            DelegationMsg::RevokeFeeAllowance(_) => KIND_REVOKE_FEE_ALLOWANCE,
            DelegationMsg::ExecAuthorized(_) => KIND_EXEC_AUTHORIZED,
        }
    }

    fn signers(&self) -> Vec<Address> {
        match self {
            DelegationMsg::Authorize(msg) => vec![msg.authorizer],
            DelegationMsg::Revoke(msg) => vec![msg.authorizer],
            DelegationMsg::AuthorizeFeeAllowance(msg) => vec![msg.authorizer],
            DelegationMsg::RevokeFeeAllowance(msg) => vec![msg.authorizer],
            DelegationMsg::ExecAuthorized(msg) => vec![msg.signer],
        }
    }
}
