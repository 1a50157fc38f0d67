//! Authorized dispatch
//!
//! Each action in a batch must name exactly one signer. Actions signed by the
//! sender go straight to the router. Any other action needs a live grant from
//! its signer to the sender whose capability accepts it; the grant is shrunk
//! or removed before the action is routed.

use super::grants::GrantLookup;
use super::{ActionRouter, BlockContext, DispatchResult, Keeper};
use crate::capability::AcceptDecision;
use crate::errors::Denial;
use warden_core::{Action, Address, WardenError, WardenResult};

impl<R: ActionRouter> Keeper<R> {
    /// Authorize and route `actions` on behalf of `sender`, in order.
    ///
    /// Stops at the first refused or failing action and returns its error.
    /// Grants consumed by earlier actions are not restored.
    pub fn dispatch_actions(
        &self,
        ctx: &mut BlockContext<'_>,
        sender: Address,
        actions: &[Box<dyn Action>],
    ) -> WardenResult<DispatchResult> {
        let _span = self.span("dispatch_actions").entered();

        if let Some(max) = self.config.max_dispatch_actions {
            if actions.len() > max {
                return Err(WardenError::unknown_request(format!(
                    "batch of {} actions exceeds the limit of {max}",
                    actions.len()
                )));
            }
        }
        let signers = sole_signers(actions)?;

        let mut result = DispatchResult::default();
        for (index, (action, signer)) in actions.iter().zip(signers).enumerate() {
            let action = action.as_ref();
            if signer != sender {
                self.consume_grant(ctx, sender, signer, action)?;
            }
            let routed = self.router.route(ctx, action).map_err(|err| {
                tracing::debug!(index, kind = %action.action_kind(), error = %err, "router failed");
                err
            })?;
            tracing::debug!(index, %signer, kind = %action.action_kind(), "action routed");
            result.results.push(routed);
        }
        Ok(result)
    }

    fn consume_grant(
        &self,
        ctx: &mut BlockContext<'_>,
        operator: Address,
        authorizer: Address,
        action: &dyn Action,
    ) -> WardenResult<()> {
        let kind = action.action_kind();
        let grant = match self.lookup(ctx, operator, authorizer, &kind)? {
            GrantLookup::Live(grant) => grant,
            GrantLookup::Missing => return Err(deny(Denial::NoGrant, operator, authorizer, action)),
            GrantLookup::Expired => return Err(deny(Denial::Expired, operator, authorizer, action)),
        };

        match grant.capability.accept(action, ctx.now()) {
            AcceptDecision::Declined => Err(deny(Denial::Declined, operator, authorizer, action)),
            AcceptDecision::Consumed => {
                tracing::debug!(%operator, %authorizer, %kind, "grant admitted action unchanged");
                Ok(())
            }
            AcceptDecision::Replace(next) => self.update(ctx, operator, authorizer, next),
            AcceptDecision::Exhausted => {
                tracing::debug!(%operator, %authorizer, %kind, "grant exhausted");
                self.revoke(ctx, operator, authorizer, &kind)
            }
        }
    }
}

fn deny(reason: Denial, operator: Address, authorizer: Address, action: &dyn Action) -> WardenError {
    tracing::warn!(
        %operator,
        %authorizer,
        kind = %action.action_kind(),
        %reason,
        "delegated action refused"
    );
    reason.into()
}

/// The one signer of every action, or an error for the first action without
/// exactly one.
fn sole_signers(actions: &[Box<dyn Action>]) -> WardenResult<Vec<Address>> {
    actions
        .iter()
        .enumerate()
        .map(|(index, action)| match action.signers().as_slice() {
            [signer] => Ok(*signer),
            signers => Err(WardenError::unknown_request(format!(
                "unsupported multi-signer action at index {index}: {} signers",
                signers.len()
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keeper::test_support::Echo;
    use assert_matches::assert_matches;
    use warden_core::{BlockHeader, Coins, DelegationConfig, Timestamp, Transfer};
    use warden_store::MemoryStore;

    #[derive(Debug)]
    struct Signed(Vec<Address>);

    impl Action for Signed {
        fn route(&self) -> &str {
            "test"
        }
        fn kind(&self) -> &str {
            "signed"
        }
        fn signers(&self) -> Vec<Address> {
            self.0.clone()
        }
    }

    const ALICE: Address = Address::new([1; 20]);
    const BOB: Address = Address::new([2; 20]);

    fn ctx(store: &mut MemoryStore) -> BlockContext<'_> {
        BlockContext::new(store, BlockHeader::new(1, Timestamp(0)))
    }

    #[test]
    fn signer_count_is_checked_before_anything_runs() {
        let keeper = Keeper::new(Echo);
        let mut store = MemoryStore::new();
        let batch: Vec<Box<dyn Action>> = vec![
            Box::new(Signed(vec![ALICE])),
            Box::new(Signed(vec![])),
        ];
        assert_matches!(
            keeper.dispatch_actions(&mut ctx(&mut store), ALICE, &batch),
            Err(WardenError::UnknownRequest { .. })
        );
    }

    #[test]
    fn self_signed_actions_route_in_order() {
        let keeper = Keeper::new(Echo);
        let mut store = MemoryStore::new();
        let batch: Vec<Box<dyn Action>> = vec![
            Box::new(Signed(vec![ALICE])),
            Box::new(Transfer::new(ALICE, BOB, Coins::single("stake", 1))),
        ];
        let result = keeper
            .dispatch_actions(&mut ctx(&mut store), ALICE, &batch)
            .unwrap();
        let data: Vec<&[u8]> = result.results.iter().map(|r| r.data.as_slice()).collect();
        assert_eq!(data, vec![&b"test/signed"[..], &b"bank/send"[..]]);
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let keeper =
            Keeper::with_config(Echo, DelegationConfig::default().with_max_dispatch_actions(1));
        let mut store = MemoryStore::new();
        let batch: Vec<Box<dyn Action>> = vec![
            Box::new(Signed(vec![ALICE])),
            Box::new(Signed(vec![ALICE])),
        ];
        assert_matches!(
            keeper.dispatch_actions(&mut ctx(&mut store), ALICE, &batch),
            Err(WardenError::UnknownRequest { .. })
        );
        assert!(keeper
            .dispatch_actions(&mut ctx(&mut store), ALICE, &batch[..1])
            .is_ok());
    }

    #[test]
    fn empty_batch_is_an_empty_result() {
        let keeper = Keeper::new(Echo);
        let mut store = MemoryStore::new();
        let result = keeper
            .dispatch_actions(&mut ctx(&mut store), ALICE, &[])
            .unwrap();
        assert!(result.is_empty());
    }
}
