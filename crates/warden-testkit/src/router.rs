//! Recording action router

use parking_lot::Mutex;
use warden_authorization::{ActionResult, ActionRouter, BlockContext, Event};
use warden_core::{Action, ActionKind, Address, WardenError, WardenResult};

/// One action the router was asked to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedAction {
    /// Route and kind of the action
    pub kind: ActionKind,
    /// Its declared signers
    pub signers: Vec<Address>,
}

/// Router that records every forwarded action instead of executing it.
///
/// Can be told to fail on one action kind; failed actions are recorded too.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    routed: Mutex<Vec<RoutedAction>>,
    fail_on: Option<ActionKind>,
}

impl RecordingRouter {
    /// Router that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Router that returns a routing error for `kind`
    pub fn failing_on(kind: ActionKind) -> Self {
        Self {
            routed: Mutex::default(),
            fail_on: Some(kind),
        }
    }

    /// Every action forwarded so far, in order
    pub fn routed(&self) -> Vec<RoutedAction> {
        self.routed.lock().clone()
    }

    /// Number of actions forwarded so far
    pub fn routed_count(&self) -> usize {
        self.routed.lock().len()
    }
}

impl ActionRouter for RecordingRouter {
    fn route(&self, _ctx: &mut BlockContext<'_>, action: &dyn Action) -> WardenResult<ActionResult> {
        let kind = action.action_kind();
        self.routed.lock().push(RoutedAction {
            kind: kind.clone(),
            signers: action.signers(),
        });
        tracing::trace!(%kind, "action recorded");
        if self.fail_on.as_ref() == Some(&kind) {
            return Err(WardenError::routing(kind.route.clone(), "configured to fail"));
        }
        Ok(ActionResult {
            data: kind.to_string().into_bytes(),
            log: format!("routed {kind}"),
            events: vec![Event::new("routed").with_attribute("kind", kind.to_string())],
        })
    }
}
