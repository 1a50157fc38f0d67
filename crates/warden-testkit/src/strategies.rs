//! Property test strategies for Warden types

use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

use warden_core::{Address, Coin, Coins, ADDRESS_LEN};

/// Denominations the strategies draw from
pub const DENOMS: &[&str] = &["atom", "stake", "uwarden"];

/// Arbitrary address
pub fn arb_address() -> impl Strategy<Value = Address> {
    any::<[u8; ADDRESS_LEN]>().prop_map(Address::new)
}

/// Arbitrary amount over [`DENOMS`], each denomination below `max`
pub fn arb_coins(max: u64) -> impl Strategy<Value = Coins> {
    prop::collection::vec((prop::sample::select(DENOMS), 0..max), 0..DENOMS.len())
        .prop_map(|entries| {
            Coins::try_new(entries.into_iter().map(|(denom, amount)| Coin::new(denom, amount)))
                .unwrap()
        })
}

/// Positive amount of a single denomination, at most `max`
pub fn arb_single_coin(max: u64) -> impl Strategy<Value = Coins> {
    (prop::sample::select(DENOMS), 1..=max).prop_map(|(denom, amount)| Coins::single(denom, amount))
}
