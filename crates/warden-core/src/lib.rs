//! Warden Core - foundation types for the delegation engine
//!
//! Everything the storage and authorization layers share lives here:
//!
//! - [`Address`]: opaque fixed-length account identifiers
//! - [`Coins`]: normalised currency amounts with non-clamping arithmetic
//! - [`Timestamp`] / [`BlockHeader`]: block time supplied by the host
//! - [`Action`]: the descriptor every dispatched action exposes
//! - [`WardenError`]: the unified error type
//! - [`serialization`]: canonical DAG-CBOR encoding for stored records
//! - [`config`]: module configuration loading and validation
//!
//! This crate performs no I/O beyond reading configuration files.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Action descriptors and the native transfer action
pub mod action;

/// Currency amounts
pub mod coins;

/// Module configuration
#[allow(missing_docs)]
pub mod config;

/// Unified error handling
pub mod errors;

/// Account identifiers
pub mod identifiers;

/// DAG-CBOR serialization (canonical format)
pub mod serialization;

/// Block time
pub mod time;

pub use action::{Action, ActionKind, Transfer};
pub use coins::{Coin, Coins, CoinsError};
pub use config::{DelegationConfig, WardenConfig};
pub use errors::{Result as WardenResult, WardenError};
pub use identifiers::{Address, AddressError, ADDRESS_LEN};
pub use time::{BlockHeader, Timestamp};
