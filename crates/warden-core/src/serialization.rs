//! DAG-CBOR serialization for stored records
//!
//! Every record the engine writes goes through these two functions so the
//! byte encoding is canonical and deterministic.

use crate::WardenError;
use serde::{de::DeserializeOwned, Serialize};

/// Serialize any serde-compatible type to DAG-CBOR bytes
pub fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>, WardenError> {
    serde_ipld_dagcbor::to_vec(value)
        .map_err(|e| WardenError::encode(format!("Failed to serialize to DAG-CBOR: {e}")))
}

/// Deserialize DAG-CBOR bytes to any serde-compatible type
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, WardenError> {
    serde_ipld_dagcbor::from_slice(bytes)
        .map_err(|e| WardenError::decode(format!("Failed to deserialize DAG-CBOR: {e}")))
}
