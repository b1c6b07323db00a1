//! Contract deployment.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use punica_config::{resolve_avm_path, resolve_wallet_path, ConfigError, ProjectConfig};
use punica_cryptography::Address;
use punica_wallets::{CredentialVault, JsonFileStore, ScryptVault, WalletStore};
use tracing::{debug, info, warn};

use crate::client::{ChainClient, DeploymentRequest};
use crate::context::ExecutionContext;
use crate::credentials::{CredentialResolver, Role};
use crate::error::{InvokeError, Result};
use crate::prompt::CredentialPrompt;
use crate::signing::{deployment_message, envelope_digest, sign_message};

#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    pub project_dir: PathBuf,
    pub network: Option<String>,
    /// AVM file; the single `.avm` in the build directory when unset.
    pub avm: Option<String>,
    pub wallet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    AlreadyDeployed { contract_hash: String },
    Deployed { contract_hash: String, transaction: String },
}

impl DeployOutcome {
    pub fn contract_hash(&self) -> &str {
        match self {
            DeployOutcome::AlreadyDeployed { contract_hash } => contract_hash,
            DeployOutcome::Deployed { contract_hash, .. } => contract_hash,
        }
    }
}

/// Hash of a compiled contract as the chain reports it: the byte-reversed
/// hash160 of the code, hex encoded.
pub fn contract_hash(code: &[u8]) -> String {
    Address::from_vm_code(code).to_hex_reversed()
}

/// Reads an AVM file holding the contract code as hex text.
pub fn read_avm(path: &Path) -> Result<Vec<u8>> {
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::AvmFileError(format!("{}: {}", path.display(), e)))?;
    let content = content.trim();
    if content.is_empty() {
        return Err(ConfigError::AvmFileError(format!("{} is empty", path.display())).into());
    }
    let code = hex::decode(content)
        .map_err(|e| ConfigError::AvmFileError(format!("{}: {}", path.display(), e)))?;
    Ok(code)
}

pub struct Deployer {
    client: Arc<dyn ChainClient>,
    prompt: Arc<dyn CredentialPrompt>,
    vault: Arc<dyn CredentialVault>,
    store: Arc<dyn WalletStore>,
}

impl Deployer {
    pub fn new(client: Arc<dyn ChainClient>, prompt: Arc<dyn CredentialPrompt>) -> Self {
        Self {
            client,
            prompt,
            vault: Arc::new(ScryptVault),
            store: Arc::new(JsonFileStore),
        }
    }

    pub fn with_vault(mut self, vault: Arc<dyn CredentialVault>) -> Self {
        self.vault = vault;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn WalletStore>) -> Self {
        self.store = store;
        self
    }

    pub async fn deploy(
        &self,
        config: &ProjectConfig,
        options: &DeployOptions,
        context: &mut ExecutionContext,
    ) -> Result<DeployOutcome> {
        let information = config.deploy_information()?;
        let (network, _) = config.network(options.network.as_deref())?;

        let avm_path = resolve_avm_path(&options.project_dir, options.avm.as_deref())?;
        let code = read_avm(&avm_path)?;
        let contract_hash = contract_hash(&code);
        info!(target: "punica", avm = %avm_path.display(), contract = %contract_hash, network = %network, "Running deployment");

        if self.client.is_deployed(&contract_hash).await? {
            warn!(target: "punica", contract = %contract_hash, "Contract has been deployed");
            return Ok(DeployOutcome::AlreadyDeployed { contract_hash });
        }

        let wallet_path = resolve_wallet_path(&options.project_dir, options.wallet.as_deref());
        let wallet = self.store.load(&wallet_path)?;
        let payer = wallet
            .account(&information.payer)
            .ok_or_else(|| InvokeError::AccountNotInWallet(information.payer.clone()))?;

        let credentials = CredentialResolver::new(&config.password, self.prompt.as_ref());
        let password = credentials.resolve(context, &payer.address, Role::Payer)?;
        let key = self.vault.unlock(payer, &password, &wallet.scrypt)?;
        drop(password);

        let mut request = DeploymentRequest {
            code: hex::encode(&code),
            name: information.name.clone(),
            version: information.version.clone(),
            author: information.author.clone(),
            email: information.email.clone(),
            description: information.desc.clone(),
            need_storage: information.need_storage,
            gas_price: information.gas_price,
            gas_limit: information.gas_limit,
            payer: payer.address.clone(),
            witnesses: Vec::new(),
        };
        let message = deployment_message(&request)?;
        debug!(target: "punica", envelope = %envelope_digest(&message), "signing deployment");
        request.witnesses = sign_message(&message, std::slice::from_ref(&key));

        let response = self.client.deploy(request).await?;
        context.finish_batch();

        match response.transaction() {
            Some(transaction) => {
                info!(target: "punica", contract = %contract_hash, transaction = %transaction, "Deploy successful to network {}", network);
                Ok(DeployOutcome::Deployed {
                    contract_hash,
                    transaction: transaction.to_string(),
                })
            }
            None => Err(InvokeError::SubmissionFailed {
                function: information.name.clone(),
                reason: format!("unexpected result {}", response.result),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_contract_hash() {
        let code = hex::decode("00c56b").expect("hex");
        assert_eq!(contract_hash(&code), "57d448d9c0323bf90d3a535c3eb084e0d34e8d8e");
    }

    #[test]
    fn test_read_avm() {
        let dir = tempfile::TempDir::new().expect("temp dir");

        let good = dir.path().join("good.avm");
        let mut file = fs::File::create(&good).expect("create");
        writeln!(file, "00c56b").expect("write");
        assert_eq!(read_avm(&good).expect("reads"), vec![0x00, 0xc5, 0x6b]);

        let empty = dir.path().join("empty.avm");
        fs::write(&empty, "  \n").expect("write");
        assert!(matches!(
            read_avm(&empty),
            Err(InvokeError::Config(ConfigError::AvmFileError(_)))
        ));

        let garbage = dir.path().join("garbage.avm");
        fs::write(&garbage, "zz").expect("write");
        assert!(matches!(
            read_avm(&garbage),
            Err(InvokeError::Config(ConfigError::AvmFileError(_)))
        ));

        assert!(read_avm(&dir.path().join("missing.avm")).is_err());
    }
}
