//! Minimal ledger for driving the keeper

use crate::RecordingRouter;
use std::time::Duration;
use warden_authorization::{BlockContext, Keeper};
use warden_core::{BlockHeader, Timestamp};
use warden_store::MemoryStore;

/// In-memory store plus a block clock.
///
/// Every [`TestLedger::ctx`] call hands out a context for the current block;
/// [`TestLedger::advance`] moves to the next block.
#[derive(Debug, Clone)]
pub struct TestLedger {
    /// Committed state
    pub store: MemoryStore,
    header: BlockHeader,
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLedger {
    /// Empty ledger at height 1, time 1_000_000 ms
    pub fn new() -> Self {
        Self::at(Timestamp::from_millis(1_000_000))
    }

    /// Empty ledger at height 1 and the given time
    pub fn at(time: Timestamp) -> Self {
        Self {
            store: MemoryStore::new(),
            header: BlockHeader::new(1, time),
        }
    }

    /// Current block time
    pub fn now(&self) -> Timestamp {
        self.header.time
    }

    /// Current block header
    pub fn header(&self) -> BlockHeader {
        self.header
    }

    /// Move to the next block, `by` later
    pub fn advance(&mut self, by: Duration) {
        self.header = BlockHeader::new(self.header.height + 1, self.header.time.saturating_add(by));
    }

    /// Context over the ledger store for the current block
    pub fn ctx(&mut self) -> BlockContext<'_> {
        BlockContext::new(&mut self.store, self.header)
    }
}

/// Keeper with default configuration over a fresh [`RecordingRouter`]
pub fn recording_keeper() -> Keeper<RecordingRouter> {
    Keeper::new(RecordingRouter::new())
}
