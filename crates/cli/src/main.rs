use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use punica_cli::commands::IncompleteBatch;
use punica_cli::{execute, Cli, ConsolePrompt};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    debug!(target: "punica", version = punica_cli::VERSION, "punica started");

    match execute(&cli, Arc::new(ConsolePrompt)).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(err) => match err.downcast::<IncompleteBatch>() {
            Ok(batch) => {
                println!("{}", batch.output);
                println!("{}", batch);
                ExitCode::FAILURE
            }
            Err(err) => {
                if cli.debug {
                    eprintln!("Error: {:?}", err);
                } else {
                    eprintln!("Error: {}.", err.to_string().trim_end_matches('.'));
                    eprintln!("To see the stacktrace use option -d.");
                }
                ExitCode::FAILURE
            }
        },
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info,punica=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = fmt().with_env_filter(env_filter).with_target(false).try_init();
}
