//! BCS pure-argument encoding
//!
//! Move entry functions receive pure arguments in Binary Canonical Serialization:
//! - `u8`: 1 byte
//! - `u64`: 8 bytes, little-endian
//! - `vector<u8>`: ULEB128 length prefix + raw bytes
//! - `address`: 32 raw bytes

use thiserror::Error;

/// Byte length of an address
pub const ADDRESS_LENGTH: usize = 32;

/// Errors that can occur during BCS encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BcsError {
    #[error("Invalid hex string")]
    InvalidHex,

    #[error("Empty input")]
    EmptyInput,

    #[error("Invalid length: expected {expected}, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

/// Append a ULEB128-encoded length
pub fn uleb128_encode(out: &mut Vec<u8>, value: u64) {
    let mut n = value;
    loop {
        let mut byte = (n & 0x7F) as u8;
        n >>= 7;
        if n != 0 {
            byte |= 0x80; // Set continuation bit
        }
        out.push(byte);
        if n == 0 {
            break;
        }
    }
}

/// Encode a `u8`
pub fn encode_u8(value: u8) -> Vec<u8> {
    vec![value]
}

/// Encode a `u64` (little-endian)
pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

/// Encode a `vector<u8>`
pub fn encode_bytes(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + 5);
    uleb128_encode(&mut out, value.len() as u64);
    out.extend_from_slice(value);
    out
}

/// Encode a `0x`-prefixed hex address as 32 raw bytes.
///
/// Short addresses (`0x2`) are left-padded with zeros.
pub fn encode_address(address: &str) -> Result<Vec<u8>, BcsError> {
    let hex_part = address.strip_prefix("0x").unwrap_or(address);
    if hex_part.is_empty() {
        return Err(BcsError::EmptyInput);
    }
    if hex_part.len() > ADDRESS_LENGTH * 2 {
        return Err(BcsError::InvalidLength {
            expected: ADDRESS_LENGTH * 2,
            found: hex_part.len(),
        });
    }
    let padded = format!("{:0>64}", hex_part);
    hex::decode(padded).map_err(|_| BcsError::InvalidHex)
}
