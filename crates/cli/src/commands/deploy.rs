use std::path::Path;
use std::sync::Arc;

use punica_invoker::{CredentialPrompt, DeployOptions, DeployOutcome, Deployer, ExecutionContext};

use super::{connect, CommandResult};
use crate::args::DeployArgs;

/// `punica deploy`
pub async fn run(project_dir: &Path, args: &DeployArgs, prompt: Arc<dyn CredentialPrompt>) -> CommandResult {
    let (config, client) = connect(project_dir, args.config.as_deref(), args.network.as_deref())?;
    let deployer = Deployer::new(client, prompt);

    let options = DeployOptions {
        project_dir: project_dir.to_path_buf(),
        network: args.network.clone(),
        avm: args.avm.clone(),
        wallet: args.wallet.clone(),
    };

    let mut context = ExecutionContext::new();
    let outcome = deployer.deploy(&config, &options, &mut context).await?;
    Ok(match outcome {
        DeployOutcome::AlreadyDeployed { contract_hash } => {
            format!("Contract {} has been deployed.", contract_hash)
        }
        DeployOutcome::Deployed {
            contract_hash,
            transaction,
        } => format!(
            "Deploy successful.\nContract hash: {}\nTransaction: {}",
            contract_hash, transaction
        ),
    })
}
