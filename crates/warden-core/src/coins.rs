//! Currency amounts
//!
//! `Coins` is a normalised multiset of denominations: sorted by denom, one
//! entry per denom, never a zero amount. Arithmetic never clamps: a
//! subtraction that would go negative in any denomination fails as a whole.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single amount of one denomination
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination name
    pub denom: String,
    /// Amount in the smallest unit
    pub amount: u64,
}

impl Coin {
    /// Create a new coin
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Errors produced while building [`Coins`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoinsError {
    /// A coin had an empty denomination
    #[error("coin denomination must not be empty")]
    EmptyDenom,

    /// Merging duplicate denominations overflowed
    #[error("amount overflow in denomination {0}")]
    Overflow(String),
}

impl From<CoinsError> for crate::WardenError {
    fn from(err: CoinsError) -> Self {
        crate::WardenError::invalid(err.to_string())
    }
}

/// Normalised multiset of currency amounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// The empty amount
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// A single-denomination amount; zero yields the empty amount
    pub fn single(denom: impl Into<String>, amount: u64) -> Self {
        if amount == 0 {
            Self::empty()
        } else {
            Self(vec![Coin::new(denom, amount)])
        }
    }

    /// Normalise arbitrary coins: merge duplicates, drop zeros, sort by denom.
    pub fn try_new(coins: impl IntoIterator<Item = Coin>) -> Result<Self, CoinsError> {
        let mut merged: BTreeMap<String, u64> = BTreeMap::new();
        for coin in coins {
            if coin.denom.is_empty() {
                return Err(CoinsError::EmptyDenom);
            }
            let entry = merged.entry(coin.denom.clone()).or_insert(0);
            *entry = entry
                .checked_add(coin.amount)
                .ok_or(CoinsError::Overflow(coin.denom))?;
        }
        Ok(Self::from_sorted(merged))
    }

    fn from_sorted(amounts: BTreeMap<String, u64>) -> Self {
        Self(
            amounts
                .into_iter()
                .filter(|(_, amount)| *amount > 0)
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        )
    }

    fn to_map(&self) -> BTreeMap<String, u64> {
        self.0
            .iter()
            .map(|coin| (coin.denom.clone(), coin.amount))
            .collect()
    }

    /// True when no denomination has a positive amount
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Same as [`Coins::is_empty`]; reads better at exhaustion checks
    pub fn is_zero(&self) -> bool {
        self.is_empty()
    }

    /// Number of denominations held
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate coins in denomination order
    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    /// Amount held of `denom`, zero if absent
    pub fn amount_of(&self, denom: &str) -> u64 {
        self.0
            .binary_search_by(|coin| coin.denom.as_str().cmp(denom))
            .map(|idx| self.0[idx].amount)
            .unwrap_or(0)
    }

    /// Sum of two amounts, `None` on overflow
    pub fn checked_add(&self, other: &Coins) -> Option<Coins> {
        let mut amounts = self.to_map();
        for coin in &other.0 {
            let entry = amounts.entry(coin.denom.clone()).or_insert(0);
            *entry = entry.checked_add(coin.amount)?;
        }
        Some(Self::from_sorted(amounts))
    }

    /// Subtract `other`, failing if any denomination would go negative.
    ///
    /// Never clamps: on failure `self` is left for the caller untouched and
    /// `None` is returned.
    pub fn safe_sub(&self, other: &Coins) -> Option<Coins> {
        let mut amounts = self.to_map();
        for coin in &other.0 {
            let held = amounts.get_mut(&coin.denom)?;
            *held = held.checked_sub(coin.amount)?;
        }
        Some(Self::from_sorted(amounts))
    }

    /// True when every denomination of `self` is covered by `other`
    pub fn is_all_lte(&self, other: &Coins) -> bool {
        self.0
            .iter()
            .all(|coin| coin.amount <= other.amount_of(&coin.denom))
    }

    /// Per-denomination minimum; denominations missing on either side drop out
    pub fn min(&self, other: &Coins) -> Coins {
        Self(
            self.0
                .iter()
                .filter_map(|coin| {
                    let amount = coin.amount.min(other.amount_of(&coin.denom));
                    (amount > 0).then(|| Coin::new(coin.denom.clone(), amount))
                })
                .collect(),
        )
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = CoinsError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        Self::try_new(coins)
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(pairs: &[(&str, u64)]) -> Coins {
        Coins::try_new(pairs.iter().map(|(d, a)| Coin::new(*d, *a))).unwrap()
    }

    #[test]
    fn normalises_on_construction() {
        let c = coins(&[("stake", 5), ("atom", 0), ("stake", 7), ("atom", 3)]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.amount_of("stake"), 12);
        assert_eq!(c.amount_of("atom"), 3);
        assert_eq!(c.to_string(), "3atom,12stake");
    }

    #[test]
    fn rejects_empty_denom_and_overflow() {
        assert_eq!(
            Coins::try_new([Coin::new("", 1)]),
            Err(CoinsError::EmptyDenom)
        );
        assert_eq!(
            Coins::try_new([Coin::new("x", u64::MAX), Coin::new("x", 1)]),
            Err(CoinsError::Overflow("x".into()))
        );
    }

    #[test]
    fn safe_sub_never_clamps() {
        let limit = coins(&[("stake", 100), ("atom", 10)]);
        assert_eq!(
            limit.safe_sub(&coins(&[("stake", 60)])),
            Some(coins(&[("stake", 40), ("atom", 10)]))
        );
        assert_eq!(limit.safe_sub(&coins(&[("stake", 101)])), None);
        assert_eq!(limit.safe_sub(&coins(&[("gold", 1)])), None);
        assert_eq!(
            limit.safe_sub(&coins(&[("stake", 100), ("atom", 10)])),
            Some(Coins::empty())
        );
    }

    #[test]
    fn min_and_lte() {
        let a = coins(&[("stake", 100), ("atom", 10)]);
        let b = coins(&[("stake", 40), ("gold", 3)]);
        assert_eq!(a.min(&b), coins(&[("stake", 40)]));
        assert!(coins(&[("stake", 40)]).is_all_lte(&a));
        assert!(!b.is_all_lte(&a));
    }

    #[test]
    fn serde_normalises() {
        let raw = vec![Coin::new("b", 1), Coin::new("a", 2), Coin::new("b", 0)];
        let bytes = serde_ipld_dagcbor::to_vec(&raw).unwrap();
        let decoded: Coins = serde_ipld_dagcbor::from_slice(&bytes).unwrap();
        assert_eq!(decoded, coins(&[("a", 2), ("b", 1)]));
    }
}
