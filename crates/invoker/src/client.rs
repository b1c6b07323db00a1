//! Chain client capability.
//!
//! The engine never builds ledger transactions itself. It hands the client a
//! signed invocation envelope and reads back either a transaction hash or a
//! pre-execution result.

use async_trait::async_trait;
use punica_smart_contract::TypedValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result type for chain client calls
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// One signature over an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Witness {
    pub public_key: String,
    pub signature: String,
}

/// A contract call handed to the chain client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    pub contract: String,
    pub method: String,
    pub parameters: Vec<TypedValue>,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub pre_exec: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    /// Threshold for multi-signature calls; `None` for single-signer calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub witnesses: Vec<Witness>,
}

/// A contract deployment handed to the chain client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    /// Hex of the compiled contract.
    pub code: String,
    pub name: String,
    pub version: String,
    pub author: String,
    pub email: String,
    pub description: String,
    pub need_storage: bool,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub payer: String,
    pub witnesses: Vec<Witness>,
}

/// What the chain returned for a call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChainResponse {
    #[serde(default)]
    pub result: Value,
}

impl ChainResponse {
    pub fn new(result: Value) -> Self {
        Self { result }
    }

    /// Transaction hash of a submitted call, if the chain returned one.
    pub fn transaction(&self) -> Option<&str> {
        self.result.as_str().filter(|hash| !hash.is_empty())
    }

    /// Payload of a pre-executed call: the nested `Result` field.
    pub fn pre_exec_result(&self) -> Option<&Value> {
        self.result.get("Result")
    }
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn is_deployed(&self, contract_hash: &str) -> ClientResult<bool>;

    async fn invoke(&self, request: InvocationRequest) -> ClientResult<ChainResponse>;

    async fn deploy(&self, request: DeploymentRequest) -> ClientResult<ChainResponse>;
}
