//! Grant table: authorize, revoke, lookup with lazy expiry

use super::{ActionRouter, BlockContext, Keeper};
use crate::capability::{Capability, Grant};
use warden_core::{ActionKind, Address, Timestamp, WardenResult};
use warden_store::{keys, RecordStore};

/// Result of reading a grant key
#[derive(Debug)]
pub(crate) enum GrantLookup {
    Live(Grant),
    Missing,
    Expired,
}

impl<R: ActionRouter> Keeper<R> {
    /// Store `capability` for `(operator, authorizer)`, replacing any previous grant
    /// for the same action kind.
    pub fn authorize(
        &self,
        ctx: &mut BlockContext<'_>,
        operator: Address,
        authorizer: Address,
        capability: Capability,
        expiration: Option<Timestamp>,
    ) -> WardenResult<()> {
        let _span = self.span("authorize").entered();
        let action = capability.target_action_kind();
        let key = keys::grant_key(&operator, &authorizer, &action)?;
        ctx.store
            .set_record(&key, &Grant::new(capability, expiration))?;
        tracing::debug!(%operator, %authorizer, %action, ?expiration, "grant stored");
        Ok(())
    }

    /// Delete the grant for `action`; absent grants are fine
    pub fn revoke(
        &self,
        ctx: &mut BlockContext<'_>,
        operator: Address,
        authorizer: Address,
        action: &ActionKind,
    ) -> WardenResult<()> {
        let _span = self.span("revoke").entered();
        let key = keys::grant_key(&operator, &authorizer, action)?;
        ctx.store.delete(&key)?;
        tracing::debug!(%operator, %authorizer, %action, "grant revoked");
        Ok(())
    }

    /// The live grant for `action`, evicting it if it has expired
    pub fn grant(
        &self,
        ctx: &mut BlockContext<'_>,
        operator: Address,
        authorizer: Address,
        action: &ActionKind,
    ) -> WardenResult<Option<Grant>> {
        let _span = self.span("grant").entered();
        match self.lookup(ctx, operator, authorizer, action)? {
            GrantLookup::Live(grant) => Ok(Some(grant)),
            GrantLookup::Missing | GrantLookup::Expired => Ok(None),
        }
    }

    /// The live capability for `action`, evicting the grant if it has expired
    pub fn get_capability(
        &self,
        ctx: &mut BlockContext<'_>,
        operator: Address,
        authorizer: Address,
        action: &ActionKind,
    ) -> WardenResult<Option<Capability>> {
        let _span = self.span("get_capability").entered();
        match self.lookup(ctx, operator, authorizer, action)? {
            GrantLookup::Live(grant) => Ok(Some(grant.capability)),
            GrantLookup::Missing | GrantLookup::Expired => Ok(None),
        }
    }

    pub(crate) fn lookup(
        &self,
        ctx: &mut BlockContext<'_>,
        operator: Address,
        authorizer: Address,
        action: &ActionKind,
    ) -> WardenResult<GrantLookup> {
        let key = keys::grant_key(&operator, &authorizer, action)?;
        let Some(grant) = ctx.store.get_record::<Grant>(&key)? else {
            return Ok(GrantLookup::Missing);
        };
        let now = ctx.now();
        if grant.is_expired(now) {
            ctx.store.delete(&key)?;
            tracing::debug!(
                %operator,
                %authorizer,
                %action,
                expiration = ?grant.expiration,
                %now,
                "expired grant evicted"
            );
            return Ok(GrantLookup::Expired);
        }
        Ok(GrantLookup::Live(grant))
    }

    /// Swap the capability of an existing grant, keeping its expiration.
    ///
    /// A grant that no longer exists stays absent.
    pub(crate) fn update(
        &self,
        ctx: &mut BlockContext<'_>,
        operator: Address,
        authorizer: Address,
        replacement: Capability,
    ) -> WardenResult<()> {
        let action = replacement.target_action_kind();
        let key = keys::grant_key(&operator, &authorizer, &action)?;
        let Some(mut grant) = ctx.store.get_record::<Grant>(&key)? else {
            tracing::debug!(%operator, %authorizer, %action, "update skipped, grant is gone");
            return Ok(());
        };
        grant.capability = replacement;
        ctx.store.set_record(&key, &grant)?;
        tracing::debug!(%operator, %authorizer, %action, "grant updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{GenericCapability, SendCapability};
    use crate::keeper::test_support::NoRoute;
    use warden_core::{BlockHeader, Coins, Transfer};
    use warden_store::MemoryStore;

    const OP: Address = Address::new([1; 20]);
    const AUTH: Address = Address::new([2; 20]);

    fn at(store: &mut MemoryStore, ms: u64) -> BlockContext<'_> {
        BlockContext::new(store, BlockHeader::new(1, Timestamp(ms)))
    }

    fn send_cap(amount: u64) -> Capability {
        SendCapability::new(Coins::single("stake", amount)).into()
    }

    #[test]
    fn authorize_overwrites_without_merging() {
        let keeper = Keeper::new(NoRoute);
        let mut store = MemoryStore::new();
        let mut ctx = at(&mut store, 0);
        keeper.authorize(&mut ctx, OP, AUTH, send_cap(10), None).unwrap();
        keeper
            .authorize(&mut ctx, OP, AUTH, send_cap(3), Some(Timestamp(9)))
            .unwrap();

        let grant = keeper
            .grant(&mut ctx, OP, AUTH, &Transfer::action_kind())
            .unwrap()
            .unwrap();
        assert_eq!(grant, Grant::new(send_cap(3), Some(Timestamp(9))));
    }

    #[test]
    fn grants_are_scoped_per_action_kind() {
        let keeper = Keeper::new(NoRoute);
        let mut store = MemoryStore::new();
        let mut ctx = at(&mut store, 0);
        let vote = ActionKind::new("gov", "vote");
        keeper
            .authorize(&mut ctx, OP, AUTH, GenericCapability::new(vote.clone(), None).into(), None)
            .unwrap();

        assert!(keeper
            .get_capability(&mut ctx, OP, AUTH, &Transfer::action_kind())
            .unwrap()
            .is_none());
        assert!(keeper.get_capability(&mut ctx, AUTH, OP, &vote).unwrap().is_none());
        assert!(keeper.get_capability(&mut ctx, OP, AUTH, &vote).unwrap().is_some());
    }

    #[test]
    fn update_keeps_expiration() {
        let keeper = Keeper::new(NoRoute);
        let mut store = MemoryStore::new();
        let mut ctx = at(&mut store, 0);
        keeper
            .authorize(&mut ctx, OP, AUTH, send_cap(10), Some(Timestamp(50)))
            .unwrap();
        keeper.update(&mut ctx, OP, AUTH, send_cap(4)).unwrap();

        let grant = keeper
            .grant(&mut ctx, OP, AUTH, &Transfer::action_kind())
            .unwrap();
        assert_eq!(grant, Some(Grant::new(send_cap(4), Some(Timestamp(50)))));
    }

    #[test]
    fn update_after_revoke_does_not_recreate() {
        let keeper = Keeper::new(NoRoute);
        let mut store = MemoryStore::new();
        let mut ctx = at(&mut store, 0);
        keeper.authorize(&mut ctx, OP, AUTH, send_cap(10), None).unwrap();
        keeper
            .revoke(&mut ctx, OP, AUTH, &Transfer::action_kind())
            .unwrap();
        keeper.update(&mut ctx, OP, AUTH, send_cap(4)).unwrap();

        drop(ctx);
        assert!(store.is_empty());
    }

    #[test]
    fn expired_lookup_evicts() {
        let keeper = Keeper::new(NoRoute);
        let mut store = MemoryStore::new();
        keeper
            .authorize(&mut at(&mut store, 0), OP, AUTH, send_cap(10), Some(Timestamp(100)))
            .unwrap();

        let kind = Transfer::action_kind();
        assert!(matches!(
            keeper.lookup(&mut at(&mut store, 100), OP, AUTH, &kind).unwrap(),
            GrantLookup::Live(_)
        ));
        assert!(matches!(
            keeper.lookup(&mut at(&mut store, 101), OP, AUTH, &kind).unwrap(),
            GrantLookup::Expired
        ));
        assert!(store.is_empty());
        assert!(matches!(
            keeper.lookup(&mut at(&mut store, 0), OP, AUTH, &kind).unwrap(),
            GrantLookup::Missing
        ));
    }

    #[test]
    fn revoking_nothing_is_fine() {
        let keeper = Keeper::new(NoRoute);
        let mut store = MemoryStore::new();
        keeper
            .revoke(&mut at(&mut store, 0), OP, AUTH, &Transfer::action_kind())
            .unwrap();
    }
}
