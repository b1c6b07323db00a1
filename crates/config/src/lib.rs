//! Punica Configuration Module
//!
//! This module provides the project configuration file (`punica-config.json`)
//! and the project layout conventions used to find contracts, ABIs and wallets.

pub mod loader;
pub mod project_config;

pub use loader::{
    load_config, load_project_config, resolve_abi_path, resolve_avm_path, resolve_config_path,
    resolve_wallet_path,
};
pub use project_config::{
    DeployInformation, FunctionCall, InvokeConfig, Network, Passwords, ProjectConfig, Signature,
};

pub use punica_cryptography::ADDRESS_VERSION;

use thiserror::Error;

/// Configuration file name looked up in a project
pub const DEFAULT_CONFIG_FILE: &str = "punica-config.json";

/// Directory holding contract sources and the configuration file
pub const DEFAULT_CONTRACTS_DIR: &str = "contracts";

/// Build output directory, relative to the project
pub const DEFAULT_BUILD_DIR: &str = "contracts/build";

/// Wallet file, relative to the project
pub const DEFAULT_WALLET_FILE: &str = "wallet/wallet.json";

/// Compiled contract file extension
pub const AVM_EXTENSION: &str = "avm";

/// Seconds waited after each state-changing invocation
pub const DEFAULT_INTER_CALL_DELAY_SECS: u64 = 6;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("punica config file not found: {0}")]
    ConfigFileNotFound(String),

    #[error("error exists in punica config file: {0}")]
    ConfigFileError(String),

    #[error("avm file error: {0}")]
    AvmFileError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
