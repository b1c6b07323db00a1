//! Hash functions for Ontology cryptography.
//!
//! This module provides the hash functions used to derive account addresses
//! and contract hashes, including SHA-256, RIPEMD-160 and their combinations.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes Hash160 (RIPEMD-160 of SHA-256) of the input data.
/// This is used for account addresses and contract hashes.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha256_hash = sha256(data);
    ripemd160(&sha256_hash)
}

/// Computes Hash256 (double SHA-256) of the input data.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    let first_hash = sha256(data);
    sha256(&first_hash)
}

/// Computes the base58check checksum of `data`.
pub fn address_checksum(data: &[u8]) -> [u8; 4] {
    let hash = hash256(data);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Verifies the base58check checksum of `data`.
pub fn verify_checksum(data: &[u8], checksum: &[u8]) -> bool {
    let computed_checksum = address_checksum(data);
    computed_checksum == checksum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let data = b"hello world";
        let hash = sha256(data);
        let expected = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
        assert_eq!(hex::encode(hash), expected);
    }

    #[test]
    fn test_hash160() {
        let hash = hash160(b"abc");
        assert_eq!(hex::encode(hash), "bb1be98c142444d7a56aa3981c3942a978e4dc33");
    }

    #[test]
    fn test_hash256() {
        let data = b"hello world";
        let hash = hash256(data);
        assert_eq!(hash, sha256(&sha256(data)));
    }

    #[test]
    fn test_address_checksum() {
        let data = b"test address data";
        let checksum = address_checksum(data);
        assert!(verify_checksum(data, &checksum));
        assert!(!verify_checksum(b"other data", &checksum));
    }
}
