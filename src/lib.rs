//! # punica-rs
//!
//! Tooling for Ontology smart-contract projects: encrypted wallets, contract
//! deployment and batches of configured contract invocations.
//!
//! The workspace is split into focused crates, re-exported here:
//!
//! - [`cryptography`]: hashing, base58check addresses, P-256 key pairs
//! - [`smart_contract`]: ABI model and the parameter codec
//! - [`wallets`]: wallet files, the credential vault and account management
//! - [`config`]: the `punica-config.json` model and project layout
//! - [`invoker`]: invocation planning, dispatch, deployment and call templates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use punica_rs::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! async fn run(client: Arc<dyn ChainClient>) -> Result<(), Box<dyn std::error::Error>> {
//!     let project = Path::new("my-project");
//!     let config = load_project_config(project, None)?;
//!     let invoker = Invoker::new(client, Arc::new(NoPrompt));
//!     let options = InvokeOptions {
//!         project_dir: project.to_path_buf(),
//!         ..InvokeOptions::default()
//!     };
//!     let report = invoker
//!         .invoke(&config, &options, &mut ExecutionContext::new())
//!         .await?;
//!     for outcome in &report {
//!         println!("{}", outcome);
//!     }
//!     Ok(())
//! }
//! ```

pub use punica_config as config;
pub use punica_cryptography as cryptography;
pub use punica_invoker as invoker;
pub use punica_smart_contract as smart_contract;
pub use punica_wallets as wallets;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for driving the engine.
pub mod prelude {
    pub use punica_config::{load_project_config, InvokeConfig, ProjectConfig};
    pub use punica_cryptography::{Address, KeyPair};
    pub use punica_invoker::{
        BatchReport, CallOutcome, CallStatus, ChainClient, CredentialPrompt, DeployOptions,
        DeployOutcome, Deployer, ExecutionContext, InvokeError, InvokeOptions, Invoker, NoPrompt,
    };
    pub use punica_smart_contract::{AbiDescriptor, ParameterValue, TypedValue};
    pub use punica_wallets::{Account, ScryptParameters, Wallet, WalletManager};
}
