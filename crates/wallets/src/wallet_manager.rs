//! Account lifecycle on a wallet file.
//!
//! Every mutation is written back through the [`WalletStore`] before it
//! returns. A mutation whose save fails is undone in memory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use punica_cryptography::KeyPair;
use tracing::info;

use crate::account::Account;
use crate::scrypt_parameters::ScryptParameters;
use crate::vault::{decrypt_account, encrypt_key_pair};
use crate::wallet::Wallet;
use crate::wallet_store::{JsonFileStore, WalletStore};
use crate::{Error, Result};

pub struct WalletManager {
    wallet: Wallet,
    path: PathBuf,
    store: Arc<dyn WalletStore>,
}

impl WalletManager {
    /// Opens an existing wallet file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_store(path, Arc::new(JsonFileStore))
    }

    pub fn open_with_store(path: impl AsRef<Path>, store: Arc<dyn WalletStore>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let wallet = store.load(&path)?;
        Ok(Self { wallet, path, store })
    }

    /// Creates and saves an empty wallet with the default scrypt parameters.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_with_scrypt(path, ScryptParameters::default_wallet())
    }

    pub fn create_with_scrypt(path: impl AsRef<Path>, scrypt: ScryptParameters) -> Result<Self> {
        Self::create_with_store(path, scrypt, Arc::new(JsonFileStore))
    }

    /// Creates an empty wallet and saves it through `store`.
    pub fn create_with_store(
        path: impl AsRef<Path>,
        scrypt: ScryptParameters,
        store: Arc<dyn WalletStore>,
    ) -> Result<Self> {
        let manager = Self {
            wallet: Wallet::with_scrypt("MyWallet", scrypt),
            path: path.as_ref().to_path_buf(),
            store,
        };
        manager.save()?;
        info!(target: "punica", path = %manager.path.display(), "wallet created");
        Ok(manager)
    }

    /// Opens the wallet at `path`, creating an empty one if the file is missing.
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scrypt(&self) -> &ScryptParameters {
        &self.wallet.scrypt
    }

    /// Account addresses in insertion order.
    pub fn list(&self) -> Vec<String> {
        self.wallet.addresses()
    }

    pub fn account(&self, address: &str) -> Option<&Account> {
        self.wallet.account(address)
    }

    /// Generates a fresh key pair and stores it under `password`.
    pub fn add_account(&mut self, label: Option<String>, password: &str) -> Result<&Account> {
        self.insert(&KeyPair::generate(), label, password)
    }

    /// Stores an existing hex private key under `password`.
    pub fn import_account(&mut self, private_key_hex: &str, password: &str) -> Result<&Account> {
        let key_pair = KeyPair::from_private_key_hex(private_key_hex)?;
        if self.wallet.contains(&key_pair.address().to_base58()) {
            return Err(Error::DuplicateAccount(key_pair.address().to_base58()));
        }
        self.insert(&key_pair, None, password)
    }

    /// Removes an account after proving `password` unlocks it.
    pub fn delete_account(&mut self, address: &str, password: &str) -> Result<Account> {
        let account = self
            .wallet
            .account(address)
            .ok_or_else(|| Error::AccountNotFound(address.to_string()))?;
        decrypt_account(account, password, &self.wallet.scrypt)?;

        let previous = self.wallet.clone();
        let removed = self.wallet.remove_account(address)?;
        if let Err(e) = self.save() {
            self.wallet = previous;
            return Err(e);
        }
        info!(target: "punica", address = %address, "account deleted");
        Ok(removed)
    }

    pub fn set_default_account(&mut self, address: &str) -> Result<()> {
        let previous = self.wallet.clone();
        self.wallet.set_default_account(address)?;
        if let Err(e) = self.save() {
            self.wallet = previous;
            return Err(e);
        }
        Ok(())
    }

    fn insert(&mut self, key_pair: &KeyPair, label: Option<String>, password: &str) -> Result<&Account> {
        let account = encrypt_key_pair(key_pair, label, password, &self.wallet.scrypt)?;
        let address = account.address.clone();

        let previous = self.wallet.clone();
        self.wallet.add_account(account)?;
        if let Err(e) = self.save() {
            self.wallet = previous;
            return Err(e);
        }
        info!(target: "punica", address = %address, "account added");

        self.wallet
            .account(&address)
            .ok_or(Error::AccountNotFound(address))
    }

    fn save(&self) -> Result<()> {
        self.store.save(&self.wallet, &self.path)
    }
}

impl std::fmt::Debug for WalletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletManager")
            .field("path", &self.path)
            .field("accounts", &self.wallet.accounts().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Keeps wallets in memory, keyed by path.
    #[derive(Default)]
    struct MemoryStore {
        wallets: Mutex<HashMap<PathBuf, Wallet>>,
    }

    impl WalletStore for MemoryStore {
        fn load(&self, path: &Path) -> Result<Wallet> {
            self.wallets
                .lock()
                .expect("lock")
                .get(path)
                .cloned()
                .ok_or_else(|| Error::WalletFileError(path.display().to_string()))
        }

        fn save(&self, wallet: &Wallet, path: &Path) -> Result<()> {
            self.wallets.lock().expect("lock").insert(path.to_path_buf(), wallet.clone());
            Ok(())
        }
    }

    fn manager(dir: &TempDir) -> WalletManager {
        WalletManager::create_with_scrypt(dir.path().join("wallet.json"), ScryptParameters::test())
            .expect("wallet created")
    }

    #[test]
    fn test_add_persists_and_round_trips() {
        let dir = TempDir::new().expect("temp dir");
        let mut manager = manager(&dir);
        let address = manager.add_account(Some("main".to_string()), "pw1").expect("added").address.clone();

        let reopened = WalletManager::open(manager.path()).expect("reopened");
        assert_eq!(reopened.list(), vec![address.clone()]);
        let account = reopened.account(&address).expect("present");
        assert_eq!(account.label, "main");
        assert!(account.is_default);
        decrypt_account(account, "pw1", reopened.scrypt()).expect("unlocks");
    }

    #[test]
    fn test_import_known_key() {
        let dir = TempDir::new().expect("temp dir");
        let mut manager = manager(&dir);
        let key = "11595eb248db36dd449033748cc112c77fb4381f70397aeec2f90c4d4ad60783";
        let account = manager.import_account(key, "pw1").expect("imported");
        assert_eq!(account.address, "AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb");

        assert!(matches!(manager.import_account(key, "pw2"), Err(Error::DuplicateAccount(_))));
        assert_eq!(manager.list().len(), 1);
    }

    #[test]
    fn test_delete_requires_password() {
        let dir = TempDir::new().expect("temp dir");
        let mut manager = manager(&dir);
        let address = manager.add_account(None, "pw1").expect("added").address.clone();

        assert!(matches!(manager.delete_account(&address, "nope"), Err(Error::WrongPassword)));
        assert_eq!(WalletManager::open(manager.path()).expect("reopened").list().len(), 1);

        manager.delete_account(&address, "pw1").expect("deleted");
        let reopened = WalletManager::open(manager.path()).expect("reopened");
        assert!(reopened.list().is_empty());
        assert!(reopened.wallet().default_account_address.is_empty());

        assert!(matches!(manager.delete_account(&address, "pw1"), Err(Error::AccountNotFound(_))));
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let dir = TempDir::new().expect("temp dir");
        let mut manager = manager(&dir);
        let mut expected = Vec::new();
        for _ in 0..3 {
            expected.push(manager.add_account(None, "pw").expect("added").address.clone());
        }
        assert_eq!(manager.list(), expected);

        manager.set_default_account(&expected[2]).expect("default set");
        let reopened = WalletManager::open(manager.path()).expect("reopened");
        assert_eq!(reopened.wallet().default_account_address, expected[2]);
    }

    #[test]
    fn test_open_or_create() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("wallet.json");
        let created = WalletManager::open_or_create(&path).expect("created");
        assert!(path.exists());
        assert_eq!(created.scrypt(), &ScryptParameters::default_wallet());
        assert!(WalletManager::open_or_create(&path).expect("opened").list().is_empty());
    }

    #[test]
    fn test_created_wallet_goes_through_store() {
        let store = Arc::new(MemoryStore::default());
        let path = PathBuf::from("memory/wallet.json");
        let mut manager =
            WalletManager::create_with_store(&path, ScryptParameters::test(), store.clone()).expect("created");
        assert!(!path.exists());

        let address = manager.add_account(None, "pw1").expect("added").address.clone();
        let reopened = WalletManager::open_with_store(&path, store).expect("reopened");
        assert_eq!(reopened.list(), vec![address]);
        assert_eq!(reopened.scrypt(), &ScryptParameters::test());
    }
}
