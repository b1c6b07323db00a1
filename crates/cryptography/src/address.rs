//! Account and contract addresses.
//!
//! An address is the Hash160 of a verification program. For a single ECDSA
//! key the program is `PUSHBYTES33 <compressed key> CHECKSIG`. Addresses are
//! displayed as base58check strings prefixed with [`ADDRESS_VERSION`].

use crate::hash::hash160;
use crate::key_pair::PublicKey;
use crate::{base58, Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Size of an address in bytes
pub const ADDRESS_SIZE: usize = 20;

/// Version byte prepended to the base58 form
pub const ADDRESS_VERSION: u8 = 0x17;

const OP_PUSHBYTES33: u8 = 0x21;
const OP_CHECKSIG: u8 = 0xac;

/// A 20-byte Ontology address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; ADDRESS_SIZE] = bytes.try_into().map_err(|_| {
            Error::InvalidAddress(format!("expected {} bytes, got {}", ADDRESS_SIZE, bytes.len()))
        })?;
        Ok(Self(array))
    }

    /// Address of the single-signature program for `public_key`.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let mut program = Vec::with_capacity(public_key.as_bytes().len() + 2);
        program.push(OP_PUSHBYTES33);
        program.extend_from_slice(public_key.as_bytes());
        program.push(OP_CHECKSIG);
        Self::from_vm_code(&program)
    }

    /// Address of arbitrary VM code, used for contract hashes.
    pub fn from_vm_code(code: &[u8]) -> Self {
        Self(hash160(code))
    }

    pub fn from_base58(encoded: &str) -> Result<Self> {
        let payload = base58::decode_check(encoded)
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", encoded, e)))?;

        if payload.len() != ADDRESS_SIZE + 1 {
            return Err(Error::InvalidAddress(format!(
                "{}: decoded length {}",
                encoded,
                payload.len()
            )));
        }
        if payload[0] != ADDRESS_VERSION {
            return Err(Error::InvalidAddress(format!(
                "{}: unexpected version byte 0x{:02x}",
                encoded, payload[0]
            )));
        }

        Self::from_slice(&payload[1..])
    }

    pub fn to_base58(&self) -> String {
        let mut payload = Vec::with_capacity(ADDRESS_SIZE + 1);
        payload.push(ADDRESS_VERSION);
        payload.extend_from_slice(&self.0);
        base58::encode_check(&payload)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Hex of the byte-reversed address, the form contract hashes are quoted in.
    pub fn to_hex_reversed(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58())
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s.trim())
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Address::from_base58(&encoded).map_err(serde::de::Error::custom)
    }
}
