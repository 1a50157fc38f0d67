//! Fee budget with a per-period cap

use super::{AllowanceDecision, BasicFeeAllowance, FeeAllowance};
use serde::{Deserialize, Serialize};
use warden_core::{Coins, Timestamp, WardenError, WardenResult};

/// A [`BasicFeeAllowance`] that additionally caps what may be drawn per period.
///
/// When block time reaches `period_reset`, `period_can_spend` refills to
/// `period_spend_limit` (or to what the basic limit still holds, if less)
/// and `period_reset` moves forward by whole periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicFeeAllowance {
    /// Overall budget and expiration
    pub basic: BasicFeeAllowance,
    /// Period length in milliseconds
    pub period_ms: u64,
    /// Amount available at the start of each period
    pub period_spend_limit: Coins,
    /// Amount left in the current period
    pub period_can_spend: Coins,
    /// Start of the next period
    pub period_reset: Timestamp,
}

impl PeriodicFeeAllowance {
    /// Allowance whose first period starts at `start`
    pub fn new(
        basic: BasicFeeAllowance,
        period_ms: u64,
        period_spend_limit: Coins,
        start: Timestamp,
    ) -> Self {
        let period_can_spend = match &basic.spend_limit {
            Some(limit) => period_spend_limit.min(limit),
            None => period_spend_limit.clone(),
        };
        Self {
            basic,
            period_ms,
            period_spend_limit,
            period_can_spend,
            period_reset: Timestamp(start.0.saturating_add(period_ms)),
        }
    }

    pub(crate) fn validate(&self) -> WardenResult<()> {
        if self.period_ms == 0 {
            return Err(WardenError::invalid("fee allowance period must be non-zero"));
        }
        self.basic.validate()?;
        if let Some(limit) = &self.basic.spend_limit {
            if !self.period_spend_limit.is_all_lte(limit) {
                return Err(WardenError::invalid(
                    "period spend limit exceeds the overall spend limit",
                ));
            }
        }
        Ok(())
    }

    fn reset_period(&mut self, now: Timestamp) {
        if now.is_before(self.period_reset) {
            return;
        }
        self.period_can_spend = match &self.basic.spend_limit {
            Some(limit) => self.period_spend_limit.min(limit),
            None => self.period_spend_limit.clone(),
        };
        let period = self.period_ms.max(1);
        let missed = (now.0 - self.period_reset.0) / period + 1;
        self.period_reset = Timestamp(
            self.period_reset
                .0
                .saturating_add(missed.saturating_mul(period)),
        );
    }

    pub(crate) fn accept(&self, fee: &Coins, now: Timestamp) -> AllowanceDecision {
        if self.basic.is_expired(now) {
            return AllowanceDecision::DeclinedAndExpired;
        }
        let mut next = self.clone();
        next.reset_period(now);

        let Some(period_left) = next.period_can_spend.safe_sub(fee) else {
            return AllowanceDecision::Declined;
        };
        match next.basic.remaining_after(fee) {
            Err(()) => AllowanceDecision::Declined,
            Ok(Some(left)) if left.is_zero() => AllowanceDecision::Exhausted,
            Ok(left) => {
                if left.is_some() {
                    next.basic.spend_limit = left;
                }
                next.period_can_spend = period_left;
                AllowanceDecision::Replace(FeeAllowance::Periodic(next))
            }
        }
    }
}
