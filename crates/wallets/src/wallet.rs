//! In-memory wallet file.
//!
//! A wallet owns its accounts and identities by value and holds the one set
//! of scrypt parameters they share.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::identity::Identity;
use crate::scrypt_parameters::ScryptParameters;
use crate::{Error, Result};

/// Wallet file format version written by punica.
pub const WALLET_VERSION: &str = "1.1";

const DEFAULT_WALLET_NAME: &str = "MyWallet";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub create_time: String,
    #[serde(default, alias = "defaultOntid")]
    pub default_ont_id: String,
    #[serde(default)]
    pub default_account_address: String,
    #[serde(default)]
    pub scrypt: ScryptParameters,
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identities: Vec<Identity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

fn default_version() -> String {
    WALLET_VERSION.to_string()
}

impl Wallet {
    /// Creates an empty wallet with fresh default scrypt parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_scrypt(name, ScryptParameters::default_wallet())
    }

    pub fn with_scrypt(name: impl Into<String>, scrypt: ScryptParameters) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            create_time: Utc::now().to_rfc3339(),
            default_ont_id: String::new(),
            default_account_address: String::new(),
            scrypt,
            accounts: Vec::new(),
            identities: Vec::new(),
            extra: None,
        }
    }

    /// Parses and checks a wallet file body.
    pub fn from_json(json: &str) -> Result<Self> {
        let wallet: Wallet =
            serde_json::from_str(json).map_err(|e| Error::WalletFileError(e.to_string()))?;
        wallet
            .scrypt
            .validate()
            .map_err(|e| Error::WalletFileError(e.to_string()))?;
        for account in &wallet.accounts {
            account
                .verify_address()
                .map_err(|e| Error::WalletFileError(e.to_string()))?;
        }
        Ok(wallet)
    }

    /// Serializes the wallet as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, address: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.address == address)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.account(address).is_some()
    }

    /// Account addresses in insertion order.
    pub fn addresses(&self) -> Vec<String> {
        self.accounts.iter().map(|account| account.address.clone()).collect()
    }

    pub fn default_account(&self) -> Option<&Account> {
        if self.default_account_address.is_empty() {
            return self.accounts.iter().find(|account| account.is_default);
        }
        self.account(&self.default_account_address)
    }

    /// Appends an account. The first account of a wallet becomes its default.
    pub fn add_account(&mut self, mut account: Account) -> Result<&Account> {
        if self.contains(&account.address) {
            return Err(Error::DuplicateAccount(account.address));
        }
        if self.accounts.is_empty() {
            account.is_default = true;
            self.default_account_address = account.address.clone();
        } else {
            account.is_default = false;
        }
        self.accounts.push(account);
        let index = self.accounts.len() - 1;
        Ok(&self.accounts[index])
    }

    /// Removes an account, clearing the default if it pointed there.
    pub fn remove_account(&mut self, address: &str) -> Result<Account> {
        let index = self
            .accounts
            .iter()
            .position(|account| account.address == address)
            .ok_or_else(|| Error::AccountNotFound(address.to_string()))?;
        let removed = self.accounts.remove(index);
        if self.default_account_address == address {
            self.default_account_address.clear();
        }
        Ok(removed)
    }

    pub fn set_default_account(&mut self, address: &str) -> Result<()> {
        if !self.contains(address) {
            return Err(Error::AccountNotFound(address.to_string()));
        }
        for account in &mut self.accounts {
            account.is_default = account.address == address;
        }
        self.default_account_address = address.to_string();
        Ok(())
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(DEFAULT_WALLET_NAME)
    }
}
