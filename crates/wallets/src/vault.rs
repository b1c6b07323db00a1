//! Credential vault.
//!
//! Account keys are protected with scrypt + AES-256-GCM:
//! - the password is NFC normalized before derivation
//! - the salt is base64 when it is exactly 24 valid base64 characters, hex otherwise
//! - the first 12 derived bytes are the nonce, the last 32 bytes are the key
//! - the account's address string is the additional authenticated data
//!
//! A GCM authentication failure and a recovered key that does not reproduce
//! the account address both mean the password was wrong.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use punica_cryptography::{KeyPair, PRIVATE_KEY_SIZE};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::account::{Account, KeyParameters, ENCRYPTION_ALGORITHM};
use crate::scrypt_parameters::{ScryptParameters, KEY_SIZE, NONCE_SIZE};
use crate::{Error, Result};

/// Length of the random salt written for new accounts.
pub const SALT_SIZE: usize = 16;

const BASE64_SALT_LEN: usize = 24;

/// GCM authentication tag appended to every sealed key.
const TAG_SIZE: usize = 16;

/// Unlocks wallet accounts.
///
/// The default implementation is [`ScryptVault`]; the seam exists so callers
/// can observe or replace unlocking.
pub trait CredentialVault: Send + Sync {
    fn unlock(&self, account: &Account, password: &str, scrypt: &ScryptParameters) -> Result<KeyPair>;
}

/// Vault backed by [`decrypt_account`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScryptVault;

impl CredentialVault for ScryptVault {
    fn unlock(&self, account: &Account, password: &str, scrypt: &ScryptParameters) -> Result<KeyPair> {
        decrypt_account(account, password, scrypt)
    }
}

/// Decodes an account salt in either of its stored encodings.
pub fn decode_salt(salt: &str) -> Result<Vec<u8>> {
    if salt.len() == BASE64_SALT_LEN {
        if let Ok(decoded) = BASE64.decode(salt) {
            // only canonical base64 counts, anything else is read as hex
            if BASE64.encode(&decoded) == salt {
                return Ok(decoded);
            }
        }
    }
    hex::decode(salt).map_err(|e| Error::DecryptionError(format!("invalid salt: {}", e)))
}

/// Decrypts an account and returns its key pair.
pub fn decrypt_account(account: &Account, password: &str, scrypt: &ScryptParameters) -> Result<KeyPair> {
    account.key_algorithm()?;
    let salt = decode_salt(&account.salt)?;
    let sealed = BASE64
        .decode(&account.key)
        .map_err(|e| Error::DecryptionError(format!("invalid encrypted key: {}", e)))?;
    if sealed.len() < TAG_SIZE {
        return Err(Error::DecryptionError(format!(
            "encrypted key has {} bytes, shorter than its tag",
            sealed.len()
        )));
    }

    let derived = derive_key(password, &salt, scrypt)?;
    let cipher = cipher_for(&derived)?;
    let nonce = Nonce::from_slice(&derived[..NONCE_SIZE]);

    let private_key = Zeroizing::new(
        cipher
            .decrypt(
                nonce,
                Payload {
                    msg: &sealed,
                    aad: account.address.as_bytes(),
                },
            )
            .map_err(|_| Error::WrongPassword)?,
    );

    if private_key.len() != PRIVATE_KEY_SIZE {
        return Err(Error::DecryptionError(format!(
            "decrypted key has {} bytes",
            private_key.len()
        )));
    }

    let key_pair = KeyPair::from_private_key(&private_key)
        .map_err(|e| Error::DecryptionError(e.to_string()))?;

    if key_pair.address().to_base58() != account.address {
        return Err(Error::WrongPassword);
    }

    debug!(target: "punica", address = %account.address, "account unlocked");
    Ok(key_pair)
}

/// Decrypts an account and returns only the raw private key.
pub fn decrypt_private_key(
    account: &Account,
    password: &str,
    scrypt: &ScryptParameters,
) -> Result<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
    decrypt_account(account, password, scrypt).map(|key_pair| key_pair.private_key_bytes())
}

/// Encrypts a key pair into a new, non-default account with a random salt.
pub fn encrypt_key_pair(
    key_pair: &KeyPair,
    label: Option<String>,
    password: &str,
    scrypt: &ScryptParameters,
) -> Result<Account> {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    let label = label.unwrap_or_else(|| Uuid::new_v4().to_string());
    encrypt_with_salt(key_pair, label, password, scrypt, &salt)
}

pub(crate) fn encrypt_with_salt(
    key_pair: &KeyPair,
    label: String,
    password: &str,
    scrypt: &ScryptParameters,
    salt: &[u8],
) -> Result<Account> {
    let algorithm = key_pair.algorithm();
    let address = key_pair.address().to_base58();

    let derived = derive_key(password, salt, scrypt)?;
    let cipher = cipher_for(&derived)?;
    let nonce = Nonce::from_slice(&derived[..NONCE_SIZE]);
    let private_key = key_pair.private_key_bytes();

    let sealed = cipher
        .encrypt(
            nonce,
            Payload {
                msg: private_key.as_slice(),
                aad: address.as_bytes(),
            },
        )
        .map_err(|e| Error::EncryptionError(e.to_string()))?;

    Ok(Account {
        address,
        label,
        lock: false,
        algorithm: algorithm.algorithm_label().to_string(),
        parameters: KeyParameters {
            curve: algorithm.curve_label().to_string(),
        },
        key: BASE64.encode(sealed),
        enc_alg: ENCRYPTION_ALGORITHM.to_string(),
        salt: BASE64.encode(salt),
        is_default: false,
        public_key: key_pair.public_key().to_hex(),
        signature_scheme: punica_cryptography::KeyAlgorithm::SIGNATURE_SCHEME.to_string(),
        hash: None,
    })
}

fn derive_key(password: &str, salt: &[u8], scrypt: &ScryptParameters) -> Result<Zeroizing<Vec<u8>>> {
    let params = scrypt.to_scrypt_params()?;
    let password = Zeroizing::new(password.nfc().collect::<String>());
    let mut derived = Zeroizing::new(vec![0u8; scrypt.dk_len as usize]);
    scrypt::scrypt(password.as_bytes(), salt, &params, &mut derived)
        .map_err(|e| Error::InvalidScryptParameters(e.to_string()))?;
    Ok(derived)
}

fn cipher_for(derived: &[u8]) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(&derived[derived.len() - KEY_SIZE..])
        .map_err(|e| Error::DecryptionError(e.to_string()))
}
