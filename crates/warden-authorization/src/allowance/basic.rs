//! Decrementing fee budget

use super::{AllowanceDecision, FeeAllowance};
use serde::{Deserialize, Serialize};
use warden_core::{Coins, Timestamp, WardenError, WardenResult};

/// A single fee budget with an optional expiration.
///
/// `spend_limit: None` is unlimited; `expiration: None` never expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicFeeAllowance {
    /// Fees left to draw
    pub spend_limit: Option<Coins>,
    /// Block time after which the allowance is void
    pub expiration: Option<Timestamp>,
}

impl BasicFeeAllowance {
    /// Allowance with the given limit and expiration
    pub fn new(spend_limit: Option<Coins>, expiration: Option<Timestamp>) -> Self {
        Self {
            spend_limit,
            expiration,
        }
    }

    /// True when the expiration is set and strictly before `now`
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expiration.is_some_and(|exp| exp.is_before(now))
    }

    /// An empty limit is spent already; `None` is the unlimited form
    pub(crate) fn validate(&self) -> WardenResult<()> {
        match &self.spend_limit {
            Some(limit) if limit.is_zero() => Err(WardenError::invalid(
                "fee allowance spend limit is empty",
            )),
            _ => Ok(()),
        }
    }

    /// Limit left after drawing `fee`; `Ok(None)` when unlimited, `Err(())` if it does not fit
    pub(crate) fn remaining_after(&self, fee: &Coins) -> Result<Option<Coins>, ()> {
        match &self.spend_limit {
            None => Ok(None),
            Some(limit) => limit.safe_sub(fee).map(Some).ok_or(()),
        }
    }

    pub(crate) fn accept(&self, fee: &Coins, now: Timestamp) -> AllowanceDecision {
        if self.is_expired(now) {
            return AllowanceDecision::DeclinedAndExpired;
        }
        match self.remaining_after(fee) {
            Err(()) => AllowanceDecision::Declined,
            Ok(None) => AllowanceDecision::Consumed,
            Ok(Some(left)) if left.is_zero() => AllowanceDecision::Exhausted,
            Ok(Some(left)) => AllowanceDecision::Replace(FeeAllowance::Basic(
                BasicFeeAllowance::new(Some(left), self.expiration),
            )),
        }
    }
}
