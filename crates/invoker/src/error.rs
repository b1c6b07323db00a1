//! Invocation errors.

use punica_config::ConfigError;
use punica_smart_contract::{AbiError, CodecError};
use thiserror::Error;

use crate::client::ClientError;

/// Result type for invocation operations
pub type Result<T> = std::result::Result<T, InvokeError>;

/// Errors raised while planning, dispatching or deploying calls.
///
/// Only the structural kinds reported by [`InvokeError::is_fatal`] stop a
/// whole batch; every other kind fails the single call it belongs to.
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error(transparent)]
    Wallet(#[from] punica_wallets::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("there is no function with name {0} in the config")]
    FunctionNotInConfig(String),

    #[error("there is no function with name {0} in the ABI file")]
    FunctionNotInAbi(String),

    #[error("no payer for {0}: set payer on the call or defaultPayer")]
    MissingPayer(String),

    #[error("account {0} is not in the wallet")]
    AccountNotInWallet(String),

    #[error("invalid signature threshold for {function}: m = {m} with {signers} signers")]
    InvalidSignatureThreshold {
        function: String,
        m: u32,
        signers: usize,
    },

    #[error("contract {contract} hasn't been deployed to network {network}")]
    DeploymentNotFound { contract: String, network: String },

    #[error("pre-execution of {0} returned no result")]
    PreExecFailed(String),

    #[error("invocation of {function} failed: {reason}")]
    SubmissionFailed { function: String, reason: String },

    #[error("password prompt failed: {0}")]
    Prompt(String),
}

impl InvokeError {
    /// Structural errors abort the whole operation.
    pub fn is_fatal(&self) -> bool {
        match self {
            InvokeError::Config(_) | InvokeError::Abi(_) | InvokeError::DeploymentNotFound { .. } => true,
            InvokeError::Wallet(e) => matches!(e, punica_wallets::Error::WalletFileError(_)),
            _ => false,
        }
    }

    pub fn is_wrong_password(&self) -> bool {
        matches!(self, InvokeError::Wallet(e) if e.is_wrong_password())
    }
}
