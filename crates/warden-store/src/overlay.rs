//! Host transaction overlay
//!
//! A [`TransactionOverlay`] buffers every write and delete over a base store.
//! Reads see the buffered state first and fall back to the base. Calling
//! [`TransactionOverlay::commit`] applies the buffer; dropping the overlay
//! discards it.
//!
//! This is the all-or-nothing context the ledger wraps around a transaction.
//! The delegation keeper never creates one for itself: it writes straight
//! through whatever store it is handed, and relies on the host to discard a
//! rejected transaction's writes.

use crate::{KvIter, KvStore, StoreResult};
use std::collections::BTreeMap;

/// Write buffer over a base [`KvStore`]
pub struct TransactionOverlay<'a, S: KvStore + ?Sized> {
    base: &'a mut S,
    // `None` marks a buffered delete
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a, S: KvStore + ?Sized> TransactionOverlay<'a, S> {
    /// Open an overlay over `base`
    pub fn new(base: &'a mut S) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
        }
    }

    /// Number of buffered writes and deletes
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Apply every buffered change to the base store
    pub fn commit(self) -> StoreResult<()> {
        let changes = self.pending.len();
        for (key, value) in self.pending {
            match value {
                Some(value) => self.base.set(&key, value)?,
                None => self.base.delete(&key)?,
            }
        }
        tracing::trace!(changes, "transaction overlay committed");
        Ok(())
    }

    /// Drop every buffered change
    pub fn discard(self) {
        tracing::trace!(changes = self.pending.len(), "transaction overlay discarded");
    }
}

impl<S: KvStore + ?Sized> KvStore for TransactionOverlay<'_, S> {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        match self.pending.get(key) {
            Some(buffered) => Ok(buffered.clone()),
            None => self.base.get(key),
        }
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        self.pending.insert(key.to_vec(), Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.pending.insert(key.to_vec(), None);
        Ok(())
    }

    fn prefix_iter<'b>(&'b self, prefix: &[u8]) -> StoreResult<KvIter<'b>> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = self.base.prefix_iter(prefix)?.collect();
        for (key, value) in self
            .pending
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
        {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Ok(Box::new(merged.into_iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn seeded() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(b"k/1", b"one".to_vec()).unwrap();
        store.set(b"k/2", b"two".to_vec()).unwrap();
        store
    }

    #[test]
    fn reads_see_buffered_state() {
        let mut base = seeded();
        let mut overlay = TransactionOverlay::new(&mut base);
        overlay.set(b"k/3", b"three".to_vec()).unwrap();
        overlay.delete(b"k/1").unwrap();

        assert_eq!(overlay.get(b"k/1").unwrap(), None);
        assert_eq!(overlay.get(b"k/2").unwrap(), Some(b"two".to_vec()));
        assert_eq!(overlay.get(b"k/3").unwrap(), Some(b"three".to_vec()));

        let keys: Vec<Vec<u8>> = overlay.prefix_iter(b"k/").unwrap().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![b"k/2".to_vec(), b"k/3".to_vec()]);
    }

    #[test]
    fn commit_applies_and_drop_discards() {
        let mut base = seeded();
        {
            let mut overlay = TransactionOverlay::new(&mut base);
            overlay.delete(b"k/2").unwrap();
            assert_eq!(overlay.pending(), 1);
        }
        assert_eq!(base, seeded());

        let mut overlay = TransactionOverlay::new(&mut base);
        overlay.delete(b"k/2").unwrap();
        overlay.set(b"k/1", b"uno".to_vec()).unwrap();
        overlay.commit().unwrap();

        assert_eq!(base.get(b"k/1").unwrap(), Some(b"uno".to_vec()));
        assert_eq!(base.get(b"k/2").unwrap(), None);
    }
}
