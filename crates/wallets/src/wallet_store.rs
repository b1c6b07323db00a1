//! Wallet persistence.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::wallet::Wallet;
use crate::{Error, Result};

/// Reads and writes whole wallets.
pub trait WalletStore: Send + Sync {
    fn load(&self, path: &Path) -> Result<Wallet>;

    /// Replaces the wallet at `path`. Implementations must never leave a
    /// partially written file behind.
    fn save(&self, wallet: &Wallet, path: &Path) -> Result<()>;
}

/// Pretty-printed JSON files, replaced atomically on save.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileStore;

impl WalletStore for JsonFileStore {
    fn load(&self, path: &Path) -> Result<Wallet> {
        let body = fs::read_to_string(path)
            .map_err(|e| Error::WalletFileError(format!("{}: {}", path.display(), e)))?;
        Wallet::from_json(&body)
    }

    fn save(&self, wallet: &Wallet, path: &Path) -> Result<()> {
        let body = wallet.to_json()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Temp file in the same directory so the rename stays on one filesystem
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(body.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path)
            .map_err(|e| Error::WalletFileError(format!("{}: {}", path.display(), e.error)))?;

        debug!(target: "punica", path = %path.display(), accounts = wallet.accounts().len(), "wallet saved");
        Ok(())
    }
}
