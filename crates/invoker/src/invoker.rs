//! Batch invocation of the configured contract calls.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use punica_config::{resolve_abi_path, resolve_wallet_path, ProjectConfig};
use punica_smart_contract::AbiDescriptor;
use punica_wallets::{CredentialVault, JsonFileStore, ScryptVault, WalletStore};
use tracing::{debug, info};

use crate::client::ChainClient;
use crate::context::ExecutionContext;
use crate::credentials::CredentialResolver;
use crate::dispatch::{BatchSettings, Dispatcher};
use crate::error::{InvokeError, Result};
use crate::outcome::BatchReport;
use crate::planner::Planner;
use crate::prompt::CredentialPrompt;

/// Where to find the project files for one batch.
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    pub project_dir: PathBuf,
    /// Network name; `defaultNet` or the first network when unset.
    pub network: Option<String>,
    /// Wallet path relative to the project.
    pub wallet: Option<String>,
    /// Calls to run, in order; every configured call when unset.
    pub functions: Option<Vec<String>>,
}

pub struct Invoker {
    client: Arc<dyn ChainClient>,
    prompt: Arc<dyn CredentialPrompt>,
    vault: Arc<dyn CredentialVault>,
    store: Arc<dyn WalletStore>,
}

impl Invoker {
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

    /// Runs a batch against the contract named by the ABI file.
    ///
    /// Unreadable configuration, ABI or wallet files and a contract that is
    /// not deployed abort the batch. Every other problem is reported against
    /// the call it belongs to.
    pub async fn invoke(
        &self,
        config: &ProjectConfig,
        options: &InvokeOptions,
        context: &mut ExecutionContext,
    ) -> Result<BatchReport> {
        let invoke = config.invoke_config()?;
        let (network, _) = config.network(options.network.as_deref())?;

        let abi_path = resolve_abi_path(&options.project_dir, &invoke.abi);
        info!(target: "punica", abi = %abi_path.display(), "Running invocation");
        let abi = AbiDescriptor::load(&abi_path)?;
        let contract = abi.contract_hash()?.to_string();

        let wallet_path = resolve_wallet_path(&options.project_dir, options.wallet.as_deref());
        let wallet = self.store.load(&wallet_path)?;
        debug!(target: "punica", wallet = %wallet_path.display(), accounts = wallet.accounts().len(), "wallet loaded");

        if !self.client.is_deployed(&contract).await? {
            return Err(InvokeError::DeploymentNotFound {
                contract,
                network: network.to_string(),
            });
        }

        let plan = Planner::new(invoke, &abi, &wallet).plan(options.functions.as_deref());

        let credentials = CredentialResolver::new(&config.password, self.prompt.as_ref());
        if let Some(default_payer) = invoke.default_payer.as_deref() {
            if plan.iter().any(|entry| entry.is_paid_by(default_payer)) {
                credentials.prime_default_payer(context, default_payer)?;
            }
        }

        let settings = BatchSettings {
            contract: contract.clone(),
            gas_price: invoke.gas_price,
            gas_limit: invoke.gas_limit,
            inter_call_delay: context.inter_call_delay(invoke.sleep_time.map(Duration::from_secs)),
        };
        let dispatcher = Dispatcher::new(
            self.client.as_ref(),
            self.vault.as_ref(),
            credentials,
            &wallet.scrypt,
            settings,
        );

        let report = dispatcher.run(context, plan).await;
        context.finish_batch();

        info!(
            target: "punica",
            contract = %contract,
            succeeded = report.successes().count(),
            failed = report.failures().count(),
            "Invocation finished"
        );
        Ok(report)
    }
}
