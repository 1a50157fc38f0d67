//! Store key layout
//!
//! Keys are built from a one-byte table prefix followed by length-prefixed
//! segments:
//!
//! ```text
//! grant          0x01 | len(op) op | len(auth) auth | len(route) route | len(kind) kind
//! fee allowance  0x02 | len(op) op | len(auth) auth
//! ```
//!
//! Address lengths are one byte, string lengths two bytes big-endian. The
//! length prefix keeps segments unambiguous, so one operator's key prefix can
//! never match another operator's keys, and keys under one operator sort by
//! the authorizer bytes.

use warden_core::{ActionKind, Address, WardenError, WardenResult};

/// Table prefix of grant records
pub const GRANT_PREFIX: u8 = 0x01;

/// Table prefix of fee-allowance records
pub const FEE_ALLOWANCE_PREFIX: u8 = 0x02;

/// Incremental builder for structured keys
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    bytes: Vec<u8>,
}

impl KeyBuilder {
    /// Start a key in `table`
    pub fn new(table: u8) -> Self {
        Self { bytes: vec![table] }
    }

    /// Append an address segment
    pub fn address(mut self, address: &Address) -> Self {
        let bytes = address.as_bytes();
        // ADDRESS_LEN is far below u8::MAX
        self.bytes.push(bytes.len() as u8);
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Append a string segment; fails if longer than `u16::MAX` bytes
    pub fn segment(mut self, segment: &str) -> WardenResult<Self> {
        let len = u16::try_from(segment.len()).map_err(|_| {
            WardenError::invalid(format!(
                "key segment of {} bytes exceeds {}",
                segment.len(),
                u16::MAX
            ))
        })?;
        self.bytes.extend_from_slice(&len.to_be_bytes());
        self.bytes.extend_from_slice(segment.as_bytes());
        Ok(self)
    }

    /// Finished key bytes
    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Cursor over a structured key
#[derive(Debug)]
pub struct KeyReader<'a> {
    rest: &'a [u8],
}

impl<'a> KeyReader<'a> {
    /// Read a key that must belong to `table`
    pub fn new(key: &'a [u8], table: u8) -> WardenResult<Self> {
        match key.split_first() {
            Some((&first, rest)) if first == table => Ok(Self { rest }),
            Some((&first, _)) => Err(WardenError::decode(format!(
                "key belongs to table {first:#04x}, expected {table:#04x}"
            ))),
            None => Err(WardenError::decode("empty key")),
        }
    }

    fn take(&mut self, len: usize) -> WardenResult<&'a [u8]> {
        if self.rest.len() < len {
            return Err(WardenError::decode(format!(
                "key truncated: wanted {len} bytes, {} left",
                self.rest.len()
            )));
        }
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        Ok(head)
    }

    /// Read an address segment
    pub fn address(&mut self) -> WardenResult<Address> {
        let len = self.take(1)?[0] as usize;
        Ok(Address::from_slice(self.take(len)?)?)
    }

    /// Read a string segment
    pub fn segment(&mut self) -> WardenResult<String> {
        let len_bytes = self.take(2)?;
        let len = u16::from_be_bytes([len_bytes[0], len_bytes[1]]) as usize;
        String::from_utf8(self.take(len)?.to_vec())
            .map_err(|e| WardenError::decode(format!("key segment is not UTF-8: {e}")))
    }

    /// Require that the whole key was consumed
    pub fn finish(self) -> WardenResult<()> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(WardenError::decode(format!(
                "{} trailing bytes in key",
                self.rest.len()
            )))
        }
    }
}

/// Key of the grant `operator` holds from `authorizer` for `action`
pub fn grant_key(
    operator: &Address,
    authorizer: &Address,
    action: &ActionKind,
) -> WardenResult<Vec<u8>> {
    Ok(KeyBuilder::new(GRANT_PREFIX)
        .address(operator)
        .address(authorizer)
        .segment(&action.route)?
        .segment(&action.kind)?
        .build())
}

/// Decode a grant key back into `(operator, authorizer, action)`
pub fn split_grant_key(key: &[u8]) -> WardenResult<(Address, Address, ActionKind)> {
    let mut reader = KeyReader::new(key, GRANT_PREFIX)?;
    let operator = reader.address()?;
    let authorizer = reader.address()?;
    let route = reader.segment()?;
    let kind = reader.segment()?;
    reader.finish()?;
    Ok((operator, authorizer, ActionKind::new(route, kind)))
}

/// Key of the fee allowance `operator` holds from `authorizer`
pub fn fee_allowance_key(operator: &Address, authorizer: &Address) -> Vec<u8> {
    KeyBuilder::new(FEE_ALLOWANCE_PREFIX)
        .address(operator)
        .address(authorizer)
        .build()
}

/// Prefix shared by every fee allowance held by `operator`
pub fn fee_allowance_prefix(operator: &Address) -> Vec<u8> {
    KeyBuilder::new(FEE_ALLOWANCE_PREFIX)
        .address(operator)
        .build()
}

/// Decode a fee-allowance key back into `(operator, authorizer)`
pub fn split_fee_allowance_key(key: &[u8]) -> WardenResult<(Address, Address)> {
    let mut reader = KeyReader::new(key, FEE_ALLOWANCE_PREFIX)?;
    let operator = reader.address()?;
    let authorizer = reader.address()?;
    reader.finish()?;
    Ok((operator, authorizer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn addr(seed: u8) -> Address {
        Address::new([seed; 20])
    }

    #[test]
    fn grant_key_round_trips() {
        let kind = ActionKind::new("bank", "send");
        let key = grant_key(&addr(1), &addr(2), &kind).unwrap();
        assert_eq!(key[0], GRANT_PREFIX);
        assert_eq!(split_grant_key(&key).unwrap(), (addr(1), addr(2), kind));
    }

    #[test]
    fn route_and_kind_cannot_bleed_into_each_other() {
        let a = grant_key(&addr(1), &addr(2), &ActionKind::new("ab", "c")).unwrap();
        let b = grant_key(&addr(1), &addr(2), &ActionKind::new("a", "bc")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn fee_keys_live_under_operator_prefix() {
        let key = fee_allowance_key(&addr(3), &addr(4));
        assert!(key.starts_with(&fee_allowance_prefix(&addr(3))));
        assert!(!key.starts_with(&fee_allowance_prefix(&addr(4))));
        assert_eq!(split_fee_allowance_key(&key).unwrap(), (addr(3), addr(4)));
    }

    #[test]
    fn tables_do_not_overlap() {
        let grant = grant_key(&addr(1), &addr(2), &ActionKind::new("x", "y")).unwrap();
        assert!(!grant.starts_with(&fee_allowance_prefix(&addr(1))));
        assert_matches!(split_fee_allowance_key(&grant), Err(WardenError::Decode { .. }));
    }

    #[test]
    fn malformed_keys_are_decode_errors() {
        let key = fee_allowance_key(&addr(3), &addr(4));
        assert_matches!(
            split_fee_allowance_key(&key[..key.len() - 1]),
            Err(WardenError::Decode { .. })
        );
        let mut long = key.clone();
        long.push(0);
        assert_matches!(split_fee_allowance_key(&long), Err(WardenError::Decode { .. }));
        assert_matches!(split_fee_allowance_key(&[]), Err(WardenError::Decode { .. }));
    }

    #[test]
    fn oversized_segment_is_rejected() {
        let huge = "x".repeat(u16::MAX as usize + 1);
        assert_matches!(
            grant_key(&addr(1), &addr(2), &ActionKind::new(huge, "k")),
            Err(WardenError::Invalid { .. })
        );
    }
}
