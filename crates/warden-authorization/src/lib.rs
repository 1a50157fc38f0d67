//! Warden Authorization - delegated permissions and fee allowances
//!
//! An authorizer grants an operator a revocable [`Capability`] over one action
//! kind, optionally with an expiration. The [`Keeper`] stores grants, evicts
//! expired ones lazily on read, and consumes them during
//! [`Keeper::dispatch_actions`] before forwarding actions to the host's
//! [`ActionRouter`]. [`FeeAllowance`]s apply the same decide-then-mutate
//! pattern to fee amounts.
//!
//! Everything here is synchronous and runs inside the host's transaction;
//! the keeper relies on that transaction to discard partial batches.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Fee allowance variants
pub mod allowance;

/// Capability variants and grant records
pub mod capability;

/// Error handling
pub mod errors;

mod handler;

/// Grant and fee-allowance keeper
pub mod keeper;

/// Inbound requests
pub mod messages;

pub use allowance::{
    AllowanceDecision, BasicFeeAllowance, FeeAllowance, FeeAllowanceGrant, FeeAllowanceRecord,
    PeriodicFeeAllowance,
};
pub use capability::{
    AcceptDecision, Capability, GenericCapability, Grant, SendCapability, CAPABILITY_TYPE_URLS,
};
pub use errors::Denial;
pub use keeper::{
    ActionResult, ActionRouter, BlockContext, DispatchResult, Event, FeeAllowances, Keeper,
};
pub use messages::{
    DelegationMsg, MsgAuthorize, MsgAuthorizeFeeAllowance, MsgExecAuthorized,
    MsgRevoke, MsgRevokeFeeAllowance,
};
