//! Typed record access
//!
//! Records are stored as canonical DAG-CBOR. [`RecordStore`] is implemented
//! for every [`KvStore`], including `dyn KvStore`, so callers can read and
//! write records without touching the encoding.

use crate::KvStore;
use serde::{de::DeserializeOwned, Serialize};
use warden_core::{serialization, WardenResult};

/// Encode/decode helpers over a raw [`KvStore`]
pub trait RecordStore: KvStore {
    /// Decode the record under `key`, if any
    fn get_record<T: DeserializeOwned>(&self, key: &[u8]) -> WardenResult<Option<T>> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serialization::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encode `record` and store it under `key`
    fn set_record<T: Serialize>(&mut self, key: &[u8], record: &T) -> WardenResult<()> {
        let bytes = serialization::to_vec(record)?;
        self.set(key, bytes)?;
        Ok(())
    }
}

impl<S: KvStore + ?Sized> RecordStore for S {}
