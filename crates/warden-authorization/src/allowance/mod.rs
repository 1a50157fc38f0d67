//! Fee allowance variants
//!
//! Fee allowances follow the capability pattern but are judged against a fee
//! amount instead of an action. Any time-based expiry lives inside the variant.

mod basic;
mod periodic;

pub use basic::BasicFeeAllowance;
pub use periodic::PeriodicFeeAllowance;

use serde::{Deserialize, Serialize};
use warden_core::{Address, Coins, Timestamp, WardenResult};

/// Serialized discriminant of [`BasicFeeAllowance`]
pub const BASIC_FEE_ALLOWANCE_TYPE_URL: &str = "/warden.authorization.BasicFeeAllowance";

/// Serialized discriminant of [`PeriodicFeeAllowance`]
pub const PERIODIC_FEE_ALLOWANCE_TYPE_URL: &str = "/warden.authorization.PeriodicFeeAllowance";

/// Every discriminant a stored fee allowance may carry
pub const FEE_ALLOWANCE_TYPE_URLS: &[&str] =
    &[BASIC_FEE_ALLOWANCE_TYPE_URL, PERIODIC_FEE_ALLOWANCE_TYPE_URL];

/// Closed set of fee budget policies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeAllowance {
    /// One decrementing budget with an optional expiration
    #[serde(rename = "/warden.authorization.BasicFeeAllowance")]
    Basic(BasicFeeAllowance),

    /// A basic budget further capped per period
    #[serde(rename = "/warden.authorization.PeriodicFeeAllowance")]
    Periodic(PeriodicFeeAllowance),
}

impl FeeAllowance {
    /// Decide whether `fee` may be drawn at `now`
    pub fn accept(&self, fee: &Coins, now: Timestamp) -> AllowanceDecision {
        match self {
            FeeAllowance::Basic(basic) => basic.accept(fee, now),
            FeeAllowance::Periodic(periodic) => periodic.accept(fee, now),
        }
    }

    /// Check the allowance is well formed
    pub fn validate(&self) -> WardenResult<()> {
        match self {
            FeeAllowance::Basic(basic) => basic.validate(),
            FeeAllowance::Periodic(periodic) => periodic.validate(),
        }
    }

    /// Serialized discriminant of this variant
    pub fn type_url(&self) -> &'static str {
        match self {
            FeeAllowance::Basic(_) => BASIC_FEE_ALLOWANCE_TYPE_URL,
            FeeAllowance::Periodic(_) => PERIODIC_FEE_ALLOWANCE_TYPE_URL,
        }
    }
}

impl From<BasicFeeAllowance> for FeeAllowance {
    fn from(basic: BasicFeeAllowance) -> Self {
        FeeAllowance::Basic(basic)
    }
}

impl From<PeriodicFeeAllowance> for FeeAllowance {
    fn from(periodic: PeriodicFeeAllowance) -> Self {
        FeeAllowance::Periodic(periodic)
    }
}

/// Outcome of [`FeeAllowance::accept`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowanceDecision {
    /// The fee does not fit
    Declined,
    /// The allowance has expired; the fee is refused and the record removed
    DeclinedAndExpired,
    /// Fee admitted; the allowance is unchanged
    Consumed,
    /// Fee admitted; the allowance becomes the carried state
    Replace(FeeAllowance),
    /// Fee admitted; nothing is left
    Exhausted,
}

impl AllowanceDecision {
    /// Whether the fee is admitted
    pub fn allowed(&self) -> bool {
        matches!(
            self,
            AllowanceDecision::Consumed | AllowanceDecision::Replace(_) | AllowanceDecision::Exhausted
        )
    }

    /// Whether the record must be removed
    pub fn removes_record(&self) -> bool {
        matches!(
            self,
            AllowanceDecision::DeclinedAndExpired | AllowanceDecision::Exhausted
        )
    }
}

/// Stored fee-allowance record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeAllowanceRecord {
    /// The budget policy
    pub allowance: FeeAllowance,
}

/// A fee allowance attributed to its operator and authorizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeAllowanceGrant {
    /// The budget policy
    pub allowance: FeeAllowance,
    /// Account allowed to draw on it
    pub operator: Address,
    /// Account paying for it
    pub authorizer: Address,
}
