//! Fee-allowance table

use super::{ActionRouter, BlockContext, Keeper};
use crate::allowance::{AllowanceDecision, FeeAllowance, FeeAllowanceGrant, FeeAllowanceRecord};
use warden_core::{serialization, Address, Coins, WardenResult};
use warden_store::{keys, KvIter, KvStore, RecordStore};

impl<R: ActionRouter> Keeper<R> {
    /// Store `allowance` for `(operator, authorizer)`, replacing any previous one
    pub fn authorize_fee_allowance(
        &self,
        ctx: &mut BlockContext<'_>,
        operator: Address,
        authorizer: Address,
        allowance: FeeAllowance,
    ) -> WardenResult<()> {
        let _span = self.span("authorize_fee_allowance").entered();
        let key = keys::fee_allowance_key(&operator, &authorizer);
        let kind = allowance.type_url();
        ctx.store
            .set_record(&key, &FeeAllowanceRecord { allowance })?;
        tracing::debug!(%operator, %authorizer, kind, "fee allowance stored");
        Ok(())
    }

    /// Delete the fee allowance; absent allowances are fine
    pub fn revoke_fee_allowance(
        &self,
        ctx: &mut BlockContext<'_>,
        operator: Address,
        authorizer: Address,
    ) -> WardenResult<()> {
        let _span = self.span("revoke_fee_allowance").entered();
        ctx.store
            .delete(&keys::fee_allowance_key(&operator, &authorizer))?;
        tracing::debug!(%operator, %authorizer, "fee allowance revoked");
        Ok(())
    }

    /// The stored fee allowance, as is
    pub fn fee_allowance(
        &self,
        ctx: &BlockContext<'_>,
        operator: Address,
        authorizer: Address,
    ) -> WardenResult<Option<FeeAllowance>> {
        let _span = self.span("fee_allowance").entered();
        let key = keys::fee_allowance_key(&operator, &authorizer);
        Ok(ctx
            .store
            .get_record::<FeeAllowanceRecord>(&key)?
            .map(|record| record.allowance))
    }

    /// Try to draw `fee` from the allowance `authorizer` gave `operator`.
    ///
    /// Returns `false` without touching the store when there is no allowance
    /// or the fee does not fit. An allowance that reports its own expiry is
    /// removed and the fee refused.
    pub fn allow_authorized_fees(
        &self,
        ctx: &mut BlockContext<'_>,
        operator: Address,
        authorizer: Address,
        fee: &Coins,
    ) -> WardenResult<bool> {
        let _span = self.span("allow_authorized_fees").entered();
        let key = keys::fee_allowance_key(&operator, &authorizer);
        let Some(record) = ctx.store.get_record::<FeeAllowanceRecord>(&key)? else {
            tracing::warn!(%operator, %authorizer, %fee, "no fee allowance");
            return Ok(false);
        };

        match record.allowance.accept(fee, ctx.now()) {
            AllowanceDecision::Declined => {
                tracing::warn!(%operator, %authorizer, %fee, "fee allowance declined");
                Ok(false)
            }
            AllowanceDecision::DeclinedAndExpired => {
                ctx.store.delete(&key)?;
                tracing::warn!(%operator, %authorizer, %fee, "fee allowance expired and removed");
                Ok(false)
            }
            AllowanceDecision::Consumed => {
                tracing::debug!(%operator, %authorizer, %fee, "fee drawn, allowance unchanged");
                Ok(true)
            }
            AllowanceDecision::Replace(allowance) => {
                ctx.store
                    .set_record(&key, &FeeAllowanceRecord { allowance })?;
                tracing::debug!(%operator, %authorizer, %fee, "fee drawn");
                Ok(true)
            }
            AllowanceDecision::Exhausted => {
                ctx.store.delete(&key)?;
                tracing::debug!(%operator, %authorizer, %fee, "fee drawn, allowance exhausted");
                Ok(true)
            }
        }
    }

    /// Every fee allowance held by `operator`, ordered by authorizer.
    ///
    /// The iterator is lazy and borrows the store; call again to restart.
    pub fn fee_allowances<'c>(
        &self,
        ctx: &'c BlockContext<'_>,
        operator: Address,
    ) -> WardenResult<FeeAllowances<'c>> {
        let _span = self.span("fee_allowances").entered();
        let prefix = keys::fee_allowance_prefix(&operator);
        let store: &'c dyn KvStore = &*ctx.store;
        Ok(FeeAllowances {
            entries: store.prefix_iter(&prefix)?,
        })
    }
}

/// Lazy iterator returned by [`Keeper::fee_allowances`].
///
/// A record that fails to decode yields an error in its place.
pub struct FeeAllowances<'a> {
    entries: KvIter<'a>,
}

impl Iterator for FeeAllowances<'_> {
    type Item = WardenResult<FeeAllowanceGrant>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.entries.next()?;
        Some(decode_entry(&key, &value))
    }
}

fn decode_entry(key: &[u8], value: &[u8]) -> WardenResult<FeeAllowanceGrant> {
    let (operator, authorizer) = keys::split_fee_allowance_key(key)?;
    let record: FeeAllowanceRecord = serialization::from_slice(value)?;
    tracing::trace!(%operator, %authorizer, "fee allowance listed");
    Ok(FeeAllowanceGrant {
        allowance: record.allowance,
        operator,
        authorizer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allowance::BasicFeeAllowance;
    use crate::keeper::test_support::NoRoute;
    use assert_matches::assert_matches;
    use warden_core::{BlockHeader, Timestamp, WardenError};
    use warden_store::MemoryStore;

    const OP: Address = Address::new([1; 20]);

    fn ctx(store: &mut MemoryStore) -> BlockContext<'_> {
        BlockContext::new(store, BlockHeader::new(1, Timestamp(0)))
    }

    fn budget(amount: u64) -> FeeAllowance {
        BasicFeeAllowance::new(Some(Coins::single("stake", amount)), None).into()
    }

    #[test]
    fn missing_allowance_refuses() {
        let keeper = Keeper::new(NoRoute);
        let mut store = MemoryStore::new();
        let allowed = keeper
            .allow_authorized_fees(&mut ctx(&mut store), OP, Address::new([2; 20]), &Coins::single("stake", 1))
            .unwrap();
        assert!(!allowed);
        assert!(store.is_empty());
    }

    #[test]
    fn exhausting_draw_removes_record() {
        let keeper = Keeper::new(NoRoute);
        let mut store = MemoryStore::new();
        let mut ctx = ctx(&mut store);
        let auth = Address::new([2; 20]);
        keeper.authorize_fee_allowance(&mut ctx, OP, auth, budget(10)).unwrap();
        assert!(keeper
            .allow_authorized_fees(&mut ctx, OP, auth, &Coins::single("stake", 10))
            .unwrap());
        assert_eq!(keeper.fee_allowance(&ctx, OP, auth).unwrap(), None);
    }

    #[test]
    fn corrupt_record_fails_listing() {
        let keeper = Keeper::new(NoRoute);
        let mut store = MemoryStore::new();
        store
            .set(&keys::fee_allowance_key(&OP, &Address::new([3; 20])), vec![0xff])
            .unwrap();
        let ctx = ctx(&mut store);
        let listed: Vec<_> = keeper.fee_allowances(&ctx, OP).unwrap().collect();
        assert_eq!(listed.len(), 1);
        assert_matches!(listed[0], Err(WardenError::Decode { .. }));
    }
}
