//! Fee allowances through the public keeper API

use proptest::prelude::*;
use std::time::Duration;
use warden_authorization::{
    BasicFeeAllowance, DelegationMsg, FeeAllowance, FeeAllowanceGrant, MsgAuthorizeFeeAllowance,
    MsgRevokeFeeAllowance, PeriodicFeeAllowance,
};
use warden_core::{Address, Timestamp};
use warden_testkit::strategies::{arb_address, arb_coins, arb_single_coin};
use warden_testkit::*;

fn budget(amount: u64) -> FeeAllowance {
    BasicFeeAllowance::new(Some(stake(amount)), None).into()
}

#[test]
fn draws_succeed_until_the_fee_no_longer_fits() {
    init_test_tracing();
    let mut ledger = TestLedger::new();
    let keeper = recording_keeper();
    let (op, auth) = (test_address(1), test_address(2));
    keeper
        .authorize_fee_allowance(&mut ledger.ctx(), op, auth, budget(100))
        .unwrap();

    assert!(keeper
        .allow_authorized_fees(&mut ledger.ctx(), op, auth, &stake(60))
        .unwrap());
    assert_eq!(
        keeper.fee_allowance(&ledger.ctx(), op, auth).unwrap(),
        Some(budget(40))
    );

    assert!(!keeper
        .allow_authorized_fees(&mut ledger.ctx(), op, auth, &stake(50))
        .unwrap());
    assert_eq!(
        keeper.fee_allowance(&ledger.ctx(), op, auth).unwrap(),
        Some(budget(40))
    );
}

#[test]
fn listing_attributes_each_authorizer() {
    let mut ledger = TestLedger::new();
    let keeper = recording_keeper();
    let op = test_address(5);
    let (first, second) = (test_address(7), test_address(3));
    keeper
        .authorize_fee_allowance(&mut ledger.ctx(), op, first, budget(10))
        .unwrap();
    keeper
        .authorize_fee_allowance(&mut ledger.ctx(), op, second, budget(20))
        .unwrap();
    // another operator's allowance from the same authorizer
    keeper
        .authorize_fee_allowance(&mut ledger.ctx(), test_address(6), first, budget(30))
        .unwrap();

    let ctx = ledger.ctx();
    let listed: Vec<FeeAllowanceGrant> = keeper
        .fee_allowances(&ctx, op)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        listed,
        vec![
            FeeAllowanceGrant {
                allowance: budget(20),
                operator: op,
                authorizer: second,
            },
            FeeAllowanceGrant {
                allowance: budget(10),
                operator: op,
                authorizer: first,
            },
        ]
    );
    // restartable
    assert_eq!(keeper.fee_allowances(&ctx, op).unwrap().count(), 2);
    assert_eq!(keeper.fee_allowances(&ctx, test_address(8)).unwrap().count(), 0);
}

#[test]
fn expired_allowance_is_refused_and_removed() {
    let mut ledger = TestLedger::at(Timestamp::from_secs(10));
    let keeper = recording_keeper();
    let (op, auth) = (test_address(1), test_address(2));
    let allowance = BasicFeeAllowance::new(None, Some(Timestamp::from_secs(10)));
    keeper
        .authorize_fee_allowance(&mut ledger.ctx(), op, auth, allowance.into())
        .unwrap();

    assert!(keeper
        .allow_authorized_fees(&mut ledger.ctx(), op, auth, &stake(1))
        .unwrap());
    ledger.advance(Duration::from_secs(1));
    assert!(!keeper
        .allow_authorized_fees(&mut ledger.ctx(), op, auth, &stake(1))
        .unwrap());
    assert!(ledger.store.is_empty());
}

#[test]
fn periodic_allowance_refills_each_period() {
    let start = Timestamp::from_secs(0);
    let mut ledger = TestLedger::at(start);
    let keeper = recording_keeper();
    let (op, auth) = (test_address(1), test_address(2));
    let allowance = PeriodicFeeAllowance::new(
        BasicFeeAllowance::new(Some(stake(100)), None),
        60_000,
        stake(30),
        start,
    );
    keeper
        .authorize_fee_allowance(&mut ledger.ctx(), op, auth, allowance.into())
        .unwrap();

    let draw = |ledger: &mut TestLedger, amount| {
        keeper
            .allow_authorized_fees(&mut ledger.ctx(), op, auth, &stake(amount))
            .unwrap()
    };
    assert!(draw(&mut ledger, 20));
    assert!(!draw(&mut ledger, 20));
    assert!(draw(&mut ledger, 10));

    ledger.advance(Duration::from_secs(60));
    assert!(draw(&mut ledger, 30));
    ledger.advance(Duration::from_secs(60));
    assert!(draw(&mut ledger, 30));

    // 10 left overall, so the next period only offers 10
    ledger.advance(Duration::from_secs(60));
    assert!(!draw(&mut ledger, 11));
    assert!(draw(&mut ledger, 10));
    assert!(ledger.store.is_empty());
}

#[test]
fn requests_grant_and_revoke_allowances() {
    let mut ledger = TestLedger::new();
    let keeper = recording_keeper();
    let (op, auth) = (test_address(1), test_address(2));

    let grant = DelegationMsg::AuthorizeFeeAllowance(MsgAuthorizeFeeAllowance {
        authorizer: auth,
        operator: op,
        allowance: budget(5),
    });
    grant.validate_basic().unwrap();
    assert!(keeper.handle(&mut ledger.ctx(), &grant).unwrap().is_empty());
    assert_eq!(
        keeper.fee_allowance(&ledger.ctx(), op, auth).unwrap(),
        Some(budget(5))
    );

    let revoke = DelegationMsg::RevokeFeeAllowance(MsgRevokeFeeAllowance {
        authorizer: auth,
        operator: op,
    });
    keeper.handle(&mut ledger.ctx(), &revoke).unwrap();
    keeper.handle(&mut ledger.ctx(), &revoke).unwrap();
    assert!(ledger.store.is_empty());
}

proptest! {
    #[test]
    fn listing_returns_every_authorizer_in_key_order(
        op in arb_address(),
        authorizers in prop::collection::btree_set(arb_address(), 0..6),
        limit in arb_coins(1_000),
    ) {
        let mut ledger = TestLedger::new();
        let keeper = recording_keeper();
        let allowance: FeeAllowance = BasicFeeAllowance::new(Some(limit), None).into();
        for authorizer in &authorizers {
            keeper
                .authorize_fee_allowance(&mut ledger.ctx(), op, *authorizer, allowance.clone())
                .unwrap();
        }

        let ctx = ledger.ctx();
        let listed: Vec<Address> = keeper
            .fee_allowances(&ctx, op)
            .unwrap()
            .map(|grant| grant.unwrap().authorizer)
            .collect();
        prop_assert_eq!(listed, authorizers.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn refused_draws_leave_the_allowance_alone(
        limit in arb_single_coin(500),
        fee in arb_single_coin(1_000),
    ) {
        let mut ledger = TestLedger::new();
        let keeper = recording_keeper();
        let (op, auth) = (test_address(1), test_address(2));
        let allowance: FeeAllowance = BasicFeeAllowance::new(Some(limit.clone()), None).into();
        keeper
            .authorize_fee_allowance(&mut ledger.ctx(), op, auth, allowance.clone())
            .unwrap();

        let allowed = keeper
            .allow_authorized_fees(&mut ledger.ctx(), op, auth, &fee)
            .unwrap();
        let stored = keeper.fee_allowance(&ledger.ctx(), op, auth).unwrap();

        prop_assert_eq!(allowed, fee.is_all_lte(&limit));
        match limit.safe_sub(&fee) {
            None => prop_assert_eq!(stored, Some(allowance)),
            Some(left) if left.is_zero() => prop_assert_eq!(stored, None),
            Some(left) => prop_assert_eq!(
                stored,
                Some(FeeAllowance::Basic(BasicFeeAllowance::new(Some(left), None)))
            ),
        }
    }
}
