//! Warden Store - the storage seam of the delegation engine
//!
//! The host ledger owns persistence. This crate defines what the engine needs
//! from it and how engine records are laid out:
//!
//! - [`KvStore`]: ordered byte-key/byte-value store with prefix iteration
//! - [`RecordStore`]: DAG-CBOR record access over any [`KvStore`]
//! - [`keys`]: structured, length-prefixed key construction
//! - [`MemoryStore`]: in-memory backend for tests and tooling
//! - [`TransactionOverlay`]: buffered writes that commit or discard as a unit

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod errors;
pub mod keys;
mod kv;
mod memory;
mod overlay;
mod typed;

pub use errors::{StoreError, StoreResult};
pub use kv::{KvIter, KvStore};
pub use memory::MemoryStore;
pub use overlay::TransactionOverlay;
pub use typed::RecordStore;
