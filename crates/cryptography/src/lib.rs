//! Punica Cryptography Library
//!
//! Cryptographic primitives backing Ontology accounts:
//! - SHA-256 / RIPEMD-160 hashing
//! - base58check encoding
//! - 20-byte account and contract addresses
//! - ECDSA P-256 key pairs and SHA256withECDSA signatures

pub mod address;
pub mod base58;
pub mod hash;
pub mod key_pair;

pub use address::{Address, ADDRESS_SIZE, ADDRESS_VERSION};
pub use key_pair::{KeyAlgorithm, KeyPair, PublicKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

use thiserror::Error;

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Cryptography-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Base58 decode error: {0}")]
    Base58Decode(String),

    #[error("Invalid checksum")]
    InvalidChecksum,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}
