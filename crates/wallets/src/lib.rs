//! Punica Wallets Library
//!
//! This crate provides the Ontology wallet file for punica projects:
//! - Wallet, account and identity model (wallet JSON version 1.1)
//! - Credential vault: scrypt + AES-256-GCM account key protection
//! - Atomic wallet file store
//! - Account lifecycle through [`WalletManager`]

pub mod account;
pub mod identity;
pub mod scrypt_parameters;
pub mod vault;
pub mod wallet;
pub mod wallet_manager;
pub mod wallet_store;

// Re-export main types
pub use account::{Account, KeyParameters, ENCRYPTION_ALGORITHM};
pub use identity::{Control, Identity};
pub use scrypt_parameters::ScryptParameters;
pub use vault::{decode_salt, decrypt_account, decrypt_private_key, encrypt_key_pair, CredentialVault, ScryptVault};
pub use wallet::{Wallet, WALLET_VERSION};
pub use wallet_manager::WalletManager;
pub use wallet_store::{JsonFileStore, WalletStore};

use thiserror::Error;

/// Result type for wallet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wallet-related errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Wallet file error: {0}")]
    WalletFileError(String),

    #[error("Wrong password")]
    WrongPassword,

    #[error("Decryption error: {0}")]
    DecryptionError(String),

    #[error("Encryption error: {0}")]
    EncryptionError(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error("Invalid scrypt parameters: {0}")]
    InvalidScryptParameters(String),

    #[error("Cryptography error: {0}")]
    Cryptography(#[from] punica_cryptography::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors that mean the supplied password was not accepted.
    pub fn is_wrong_password(&self) -> bool {
        matches!(self, Error::WrongPassword)
    }
}
