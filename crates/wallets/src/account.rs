//! Wallet account entries.

use punica_cryptography::{Address, KeyAlgorithm, PublicKey};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The only key encryption scheme wallet files use.
pub const ENCRYPTION_ALGORITHM: &str = "aes-256-gcm";

/// Curve parameters of an account key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyParameters {
    pub curve: String,
}

impl Default for KeyParameters {
    fn default() -> Self {
        Self {
            curve: KeyAlgorithm::P256.to_string(),
        }
    }
}

/// One encrypted account of a wallet file.
///
/// `key` and `salt` stay opaque until the vault decrypts them with the right
/// password. The raw private key is never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub address: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub lock: bool,
    pub algorithm: String,
    #[serde(default)]
    pub parameters: KeyParameters,
    /// Base64 of `ciphertext || tag`.
    pub key: String,
    #[serde(rename = "enc-alg", default = "default_encryption_algorithm")]
    pub enc_alg: String,
    pub salt: String,
    #[serde(default)]
    pub is_default: bool,
    pub public_key: String,
    #[serde(default = "default_signature_scheme")]
    pub signature_scheme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

fn default_encryption_algorithm() -> String {
    ENCRYPTION_ALGORITHM.to_string()
}

fn default_signature_scheme() -> String {
    KeyAlgorithm::SIGNATURE_SCHEME.to_string()
}

impl Account {
    /// Key algorithm declared by `algorithm` and `parameters.curve`.
    pub fn key_algorithm(&self) -> Result<KeyAlgorithm> {
        KeyAlgorithm::from_labels(&self.algorithm, &self.parameters.curve)
            .map_err(|e| Error::DecryptionError(e.to_string()))
    }

    /// Parses the declared base58 address.
    pub fn parsed_address(&self) -> Result<Address> {
        Ok(Address::from_base58(&self.address)?)
    }

    /// Parses the stored public key.
    pub fn parsed_public_key(&self) -> Result<PublicKey> {
        Ok(PublicKey::from_hex(&self.public_key)?)
    }

    /// Checks that `address` is the one derived from `publicKey`.
    pub fn verify_address(&self) -> Result<()> {
        let derived = self.parsed_public_key()?.address();
        if derived.to_base58() != self.address {
            return Err(Error::WalletFileError(format!(
                "account {} does not match its public key",
                self.address
            )));
        }
        Ok(())
    }
}
