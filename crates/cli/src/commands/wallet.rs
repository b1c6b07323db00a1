//! `punica wallet account ...`

use std::path::Path;

use punica_config::resolve_wallet_path;
use punica_invoker::CredentialPrompt;
use punica_wallets::WalletManager;
use tracing::info;

use super::CommandResult;
use crate::args::AccountCommand;
use crate::console::{read_existing_password, read_new_password};

pub fn run(
    project_dir: &Path,
    wallet: Option<&str>,
    command: &AccountCommand,
    prompt: &dyn CredentialPrompt,
) -> CommandResult {
    let path = resolve_wallet_path(project_dir, wallet);

    match command {
        AccountCommand::Add { label } => {
            let mut manager = WalletManager::open_or_create(&path)?;
            let password = read_new_password(prompt)?;
            let account = manager.add_account(label.clone(), &password)?;
            info!(target: "punica", address = %account.address, wallet = %path.display(), "account added");
            Ok(format!("Create account successful.\nAddress: {}", account.address))
        }
        AccountCommand::Import { private_key } => {
            let mut manager = WalletManager::open_or_create(&path)?;
            let password = read_new_password(prompt)?;
            let account = manager.import_account(private_key.trim(), &password)?;
            info!(target: "punica", address = %account.address, wallet = %path.display(), "account imported");
            Ok(format!("Import account successful.\nAddress: {}", account.address))
        }
        AccountCommand::Delete { address } => {
            let mut manager = WalletManager::open(&path)?;
            let password = read_existing_password(prompt, address)?;
            let account = manager.delete_account(address, &password)?;
            info!(target: "punica", address = %account.address, wallet = %path.display(), "account deleted");
            Ok(format!("Delete account successful.\nAddress: {}", account.address))
        }
        AccountCommand::List => {
            let manager = WalletManager::open(&path)?;
            let lines: Vec<String> = manager
                .wallet()
                .accounts()
                .iter()
                .map(|account| {
                    let marker = if account.is_default { " (default)" } else { "" };
                    format!("{}{}", account.address, marker)
                })
                .collect();
            if lines.is_empty() {
                return Ok("The wallet has no accounts.".to_string());
            }
            Ok(format!("Account list:\n{}", lines.join("\n")))
        }
    }
}
