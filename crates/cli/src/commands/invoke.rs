use std::fmt;
use std::path::Path;
use std::sync::Arc;

use punica_config::ProjectConfig;
use punica_invoker::{ChainClient, CredentialPrompt, ExecutionContext, InvokeOptions, Invoker};
use tracing::warn;

use super::{connect, CommandResult};
use crate::args::InvokeArgs;

/// A batch that ran to the end with some calls not succeeding.
///
/// `output` holds every outcome line and is printed like a successful run;
/// only the exit status differs.
#[derive(Debug, Clone, PartialEq)]
pub struct IncompleteBatch {
    pub output: String,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for IncompleteBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} invocations did not succeed", self.failed, self.total)
    }
}

impl std::error::Error for IncompleteBatch {}

/// `punica invoke`: runs the configured calls and prints one line per call.
pub async fn run(
    project_dir: &Path,
    args: &InvokeArgs,
    debug: bool,
    prompt: Arc<dyn CredentialPrompt>,
) -> CommandResult {
    let (config, client) = connect(project_dir, args.config.as_deref(), args.network.as_deref())?;
    run_with_client(project_dir, args, debug, &config, client, prompt).await
}

/// Runs the batch of an already loaded project against `client`.
pub async fn run_with_client(
    project_dir: &Path,
    args: &InvokeArgs,
    debug: bool,
    config: &ProjectConfig,
    client: Arc<dyn ChainClient>,
    prompt: Arc<dyn CredentialPrompt>,
) -> CommandResult {
    let invoker = Invoker::new(client, prompt);

    let options = InvokeOptions {
        project_dir: project_dir.to_path_buf(),
        network: args.network.clone(),
        wallet: args.wallet.clone(),
        functions: args.functions.clone(),
    };

    let mut context = ExecutionContext::new().with_debug(debug);
    let cancel = context.cancel_handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!(target: "punica", "interrupted, remaining calls are skipped");
            cancel.cancel();
        }
    });

    let report = invoker.invoke(config, &options, &mut context).await;
    interrupt.abort();
    let report = report?;

    let output = report.render(context.debug);
    let failed = report.len() - report.successes().count();
    if failed > 0 {
        return Err(IncompleteBatch {
            output,
            failed,
            total: report.len(),
        }
        .into());
    }
    Ok(output)
}
