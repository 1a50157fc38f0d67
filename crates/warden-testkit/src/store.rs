//! Store wrapper that counts its traffic

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use warden_store::{KvIter, KvStore, MemoryStore, StoreError, StoreResult};

/// Snapshot of [`MeasuredStore`] counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    /// Point reads
    pub reads: usize,
    /// Writes
    pub writes: usize,
    /// Deletes
    pub deletes: usize,
    /// Prefix scans started
    pub iterations: usize,
}

/// A [`KvStore`] proxy that measures reads, writes, deletes and scans.
///
/// Writes and deletes can be made to fail with a backend error.
#[derive(Debug, Default)]
pub struct MeasuredStore<S = MemoryStore> {
    reads: AtomicUsize,
    writes: AtomicUsize,
    deletes: AtomicUsize,
    iterations: AtomicUsize,
    writes_fail: AtomicBool,
    inner: S,
}

impl<S: KvStore> MeasuredStore<S> {
    /// Wrap `inner`
    pub fn new(inner: S) -> Self {
        Self {
            reads: AtomicUsize::default(),
            writes: AtomicUsize::default(),
            deletes: AtomicUsize::default(),
            iterations: AtomicUsize::default(),
            writes_fail: AtomicBool::default(),
            inner,
        }
    }

    /// Current counters
    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            iterations: self.iterations.load(Ordering::Relaxed),
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in [&self.reads, &self.writes, &self.deletes, &self.iterations] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Make every later write and delete fail, or succeed again
    pub fn fail_writes(&self, fail: bool) {
        self.writes_fail.store(fail, Ordering::Relaxed);
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.writes_fail.load(Ordering::Relaxed) {
            return Err(StoreError::Backend("writes disabled".to_string()));
        }
        Ok(())
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: KvStore> KvStore for MeasuredStore<S> {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.inner.get(key)
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.check_writable()?;
        self.inner.set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        self.check_writable()?;
        self.inner.delete(key)
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> StoreResult<KvIter<'a>> {
        self.iterations.fetch_add(1, Ordering::Relaxed);
        self.inner.prefix_iter(prefix)
    }
}
