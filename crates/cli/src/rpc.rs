//! JSON-RPC 2.0 chain client.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use punica_invoker::{
    ChainClient, ChainResponse, ClientError, ClientResult, DeploymentRequest, InvocationRequest,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

/// Method names understood by the endpoint.
pub const GET_CONTRACT_STATE: &str = "getcontractstate";
pub const SEND_INVOCATION: &str = "sendinvocation";
pub const SEND_CONTRACT: &str = "sendcontract";

#[derive(Debug, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Vec<Value>,
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcResponse {
    /// The `result` member, or the endpoint's error.
    pub fn into_result(self) -> ClientResult<Value> {
        if let Some(error) = self.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

/// Talks to the configured network's RPC address.
pub struct RpcChainClient {
    http_client: Client,
    base_address: Url,
    next_id: AtomicU64,
}

impl RpcChainClient {
    pub fn new(address: &str) -> ClientResult<Self> {
        let base_address = Url::parse(address)
            .map_err(|e| ClientError::Transport(format!("invalid RPC address {}: {}", address, e)))?;
        Ok(Self {
            http_client: Client::new(),
            base_address,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    pub fn request(&self, method: &str, params: Vec<Value>) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0",
            method: method.to_string(),
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub async fn send(&self, method: &str, params: Vec<Value>) -> ClientResult<Value> {
        let request = self.request(method, params);
        debug!(target: "punica", method = %method, id = request.id, "rpc request");

        let response = self
            .http_client
            .post(self.base_address.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let content = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("failed to read response: {}", e)))?;

        let parsed: RpcResponse = serde_json::from_str(&content)
            .map_err(|e| ClientError::InvalidResponse(format!("{}: {}", e, content)))?;
        parsed.into_result()
    }
}

fn to_value<T: Serialize>(value: &T) -> ClientResult<Value> {
    serde_json::to_value(value).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn is_deployed(&self, contract_hash: &str) -> ClientResult<bool> {
        match self.send(GET_CONTRACT_STATE, vec![json!(contract_hash), json!(1)]).await {
            Ok(result) => Ok(!result.is_null()),
            // unknown contracts come back as an RPC error
            Err(ClientError::Rpc { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn invoke(&self, request: InvocationRequest) -> ClientResult<ChainResponse> {
        let pre_exec = request.pre_exec;
        let result = self
            .send(SEND_INVOCATION, vec![to_value(&request)?, json!(pre_exec)])
            .await?;
        Ok(ChainResponse::new(result))
    }

    async fn deploy(&self, request: DeploymentRequest) -> ClientResult<ChainResponse> {
        let result = self.send(SEND_CONTRACT, vec![to_value(&request)?]).await?;
        Ok(ChainResponse::new(result))
    }
}
