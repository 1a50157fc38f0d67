//! The delegation keeper
//!
//! [`Keeper`] owns the grant and fee-allowance tables and the dispatch
//! procedure that consumes grants before forwarding actions. It holds no
//! state of its own: every operation works on the store inside the
//! [`BlockContext`] it is handed and reads time only from the block header.
//!
//! The keeper never buffers or undoes its own writes. When a batch fails
//! partway through, grants consumed by earlier actions stay consumed in the
//! store; discarding them is the job of the host transaction that wraps the
//! call.

mod dispatch;
mod fees;
mod grants;

pub use fees::FeeAllowances;

use warden_core::{Action, BlockHeader, DelegationConfig, Timestamp, WardenResult};
use warden_store::KvStore;

/// Store and block header an operation runs against
pub struct BlockContext<'a> {
    /// Ledger store, already scoped to the current transaction
    pub store: &'a mut dyn KvStore,
    /// Header of the block being executed
    pub header: BlockHeader,
}

impl<'a> BlockContext<'a> {
    /// Pair a store with a block header
    pub fn new(store: &'a mut dyn KvStore, header: BlockHeader) -> Self {
        Self { store, header }
    }

    /// Current block time
    pub fn now(&self) -> Timestamp {
        self.header.time
    }
}

/// Key/value annotation attached to an [`ActionResult`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    /// Event type
    pub kind: String,
    /// Ordered attributes
    pub attributes: Vec<(String, String)>,
}

impl Event {
    /// Event with no attributes
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }
}

/// What the router reports for one executed action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResult {
    /// Opaque result payload
    pub data: Vec<u8>,
    /// Human readable log
    pub log: String,
    /// Emitted events
    pub events: Vec<Event>,
}

/// Results of a dispatched batch, one per action, in batch order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// Per-action results
    pub results: Vec<ActionResult>,
}

impl DispatchResult {
    /// Result of the final action; what callers expecting a single result read
    pub fn last(&self) -> Option<&ActionResult> {
        self.results.last()
    }

    /// Number of routed actions
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when nothing was routed
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Executes admitted actions.
///
/// The keeper forwards to the router only after authorization succeeds and
/// passes its errors through unchanged.
pub trait ActionRouter {
    /// Execute `action`
    fn route(&self, ctx: &mut BlockContext<'_>, action: &dyn Action) -> WardenResult<ActionResult>;
}

impl<R: ActionRouter + ?Sized> ActionRouter for &R {
    fn route(&self, ctx: &mut BlockContext<'_>, action: &dyn Action) -> WardenResult<ActionResult> {
        (**self).route(ctx, action)
    }
}

/// Grant engine, fee-allowance engine and dispatch coordinator
#[derive(Debug, Clone)]
pub struct Keeper<R> {
    router: R,
    config: DelegationConfig,
}

impl<R: ActionRouter> Keeper<R> {
    /// Keeper with default configuration
    pub fn new(router: R) -> Self {
        Self::with_config(router, DelegationConfig::default())
    }

    /// Keeper with explicit configuration
    pub fn with_config(router: R, config: DelegationConfig) -> Self {
        Self { router, config }
    }

    /// Active configuration
    pub fn config(&self) -> &DelegationConfig {
        &self.config
    }

    /// The router admitted actions are forwarded to
    pub fn router(&self) -> &R {
        &self.router
    }

    fn span(&self, operation: &'static str) -> tracing::Span {
        tracing::debug_span!("delegation", module = %self.config.module_name, operation)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use warden_core::WardenError;

    /// Router that rejects everything; for tests that never route
    #[derive(Debug, Default)]
    pub struct NoRoute;

    impl ActionRouter for NoRoute {
        fn route(
            &self,
            _ctx: &mut BlockContext<'_>,
            action: &dyn Action,
        ) -> WardenResult<ActionResult> {
            Err(WardenError::routing(action.route(), "routing disabled"))
        }
    }

    /// Router that echoes the action kind back as data
    #[derive(Debug, Default)]
    pub struct Echo;

    impl ActionRouter for Echo {
        fn route(
            &self,
            _ctx: &mut BlockContext<'_>,
            action: &dyn Action,
        ) -> WardenResult<ActionResult> {
            Ok(ActionResult {
                data: action.action_kind().to_string().into_bytes(),
                ..ActionResult::default()
            })
        }
    }
}
