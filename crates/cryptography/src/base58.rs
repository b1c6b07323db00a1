//! Base58check encoding.
//!
//! Payloads carry a trailing 4-byte checksum: the first four bytes of the
//! double SHA-256 of the payload.

use crate::hash::{address_checksum, verify_checksum};
use crate::{Error, Result};

const CHECKSUM_SIZE: usize = 4;

/// Encodes `data` with a trailing checksum.
pub fn encode_check(data: &[u8]) -> String {
    let mut buffer = Vec::with_capacity(data.len() + CHECKSUM_SIZE);
    buffer.extend_from_slice(data);
    buffer.extend_from_slice(&address_checksum(data));
    bs58::encode(buffer).into_string()
}

/// Decodes a base58check string and strips the verified checksum.
pub fn decode_check(encoded: &str) -> Result<Vec<u8>> {
    let mut buffer = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| Error::Base58Decode(e.to_string()))?;

    if buffer.len() < CHECKSUM_SIZE {
        return Err(Error::Base58Decode("payload too short".to_string()));
    }

    let payload_len = buffer.len() - CHECKSUM_SIZE;
    if !verify_checksum(&buffer[..payload_len], &buffer[payload_len..]) {
        return Err(Error::InvalidChecksum);
    }

    buffer.truncate(payload_len);
    Ok(buffer)
}
