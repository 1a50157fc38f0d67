//! In-memory store
//!
//! A [`BTreeMap`]-backed [`KvStore`]. Keys iterate in byte order, matching
//! the ordering guarantees of the ledger stores the engine runs against.

use crate::{KvIter, KvStore, StoreResult};
use std::collections::BTreeMap;

/// Ordered in-memory key-value store; nothing is persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the store holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        self.entries.insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> StoreResult<KvIter<'a>> {
        let prefix = prefix.to_vec();
        Ok(Box::new(
            self.entries
                .range(prefix.clone()..)
                .take_while(move |(key, _)| key.starts_with(&prefix))
                .map(|(key, value)| (key.clone(), value.clone())),
        ))
    }
}
