//! Warden Testing Infrastructure
//!
//! Shared fixtures for the delegation engine's tests: deterministic
//! accounts and amounts, a router that records what it was asked to execute,
//! a store that counts its traffic, a span recorder, and a small ledger that hands out
//! block contexts at a controllable time.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! warden-testkit = { path = "../warden-testkit" }
//! ```
//!
//! ```rust,no_run
//! use warden_testkit::*;
//!
//! let mut ledger = TestLedger::new();
//! let keeper = recording_keeper();
//! let result = keeper.dispatch_actions(&mut ledger.ctx(), test_address(1), &[]);
//! assert!(result.unwrap().is_empty());
//! ```

pub mod ledger;
pub mod router;
pub mod spans;
pub mod store;
pub mod strategies;

pub use ledger::{recording_keeper, TestLedger};
pub use router::{RecordingRouter, RoutedAction};
pub use spans::SpanRecorder;
pub use store::{MeasuredStore, StoreCounts};

use once_cell::sync::Lazy;
use warden_core::{Address, Coins, ADDRESS_LEN};

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

/// Install a test log subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}

/// Deterministic address whose every byte is `seed`
pub fn test_address(seed: u8) -> Address {
    Address::new([seed; ADDRESS_LEN])
}

/// `amount` of the test denomination
pub fn stake(amount: u64) -> Coins {
    Coins::single(STAKE, amount)
}

/// Denomination used throughout the tests
pub const STAKE: &str = "stake";
