//! Command handlers. Each returns the text printed on success.

pub mod deploy;
pub mod invoke;
pub mod template;
pub mod tool;
pub mod wallet;

pub use invoke::IncompleteBatch;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use punica_config::{load_project_config, ProjectConfig};
use punica_invoker::{ChainClient, CredentialPrompt};

use crate::args::{Cli, Command, WalletCommand};
use crate::rpc::RpcChainClient;

/// Result of a command: the text to print.
pub type CommandResult = Result<String>;

/// Loads the project configuration and connects to the selected network.
pub fn connect(
    project_dir: &Path,
    config: Option<&str>,
    network: Option<&str>,
) -> Result<(ProjectConfig, Arc<dyn ChainClient>)> {
    let config = load_project_config(project_dir, config)?;
    let address = config.network_address(network)?;
    let client: Arc<dyn ChainClient> = Arc::new(RpcChainClient::new(&address)?);
    Ok((config, client))
}

/// Runs the parsed command line.
pub async fn execute(cli: &Cli, prompt: Arc<dyn CredentialPrompt>) -> CommandResult {
    let project_dir = cli.project_dir();
    match &cli.command {
        Command::Invoke(args) => invoke::run(&project_dir, args, cli.debug, prompt).await,
        Command::Deploy(args) => deploy::run(&project_dir, args, prompt).await,
        Command::Template(args) => template::run(&project_dir, args),
        Command::Wallet(args) => match &args.command {
            WalletCommand::Account(command) => {
                wallet::run(&project_dir, args.wallet.as_deref(), command, prompt.as_ref())
            }
        },
        Command::Tool(command) => tool::run(command, prompt.as_ref()),
    }
}
