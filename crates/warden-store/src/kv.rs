//! The host store interface
//!
//! The ledger supplies an ordered byte-key/byte-value store. Everything the
//! delegation engine persists goes through this trait; it is object safe so
//! keepers can work against `&mut dyn KvStore` without knowing the backend.

use crate::StoreResult;

/// Iterator over `(key, value)` entries in ascending key order
pub type KvIter<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// Ordered byte-key/byte-value store
pub trait KvStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> StoreResult<()>;

    /// Every entry whose key starts with `prefix`, in ascending key order
    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> StoreResult<KvIter<'a>>;

    /// True when `key` holds a value
    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KvStore + ?Sized> KvStore for &mut T {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        (**self).delete(key)
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> StoreResult<KvIter<'a>> {
        (**self).prefix_iter(prefix)
    }
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        (**self).delete(key)
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> StoreResult<KvIter<'a>> {
        (**self).prefix_iter(prefix)
    }
}
