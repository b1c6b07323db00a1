//! `punica-config.json` model.

use std::fmt;

use indexmap::IndexMap;
use punica_smart_contract::{Argument, ParameterValue};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::{ConfigError, Result};

/// Gas price used when the configuration gives none
pub const DEFAULT_GAS_PRICE: u64 = 500;

/// Gas limit used when the configuration gives none
pub const DEFAULT_GAS_LIMIT: u64 = 20000;

/// Whole project configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub networks: IndexMap<String, Network>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_net: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_information: Option<DeployInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoke_config: Option<InvokeConfig>,
    #[serde(default)]
    pub password: Passwords,
}

impl ProjectConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::ConfigFileError(e.to_string()))
    }

    pub fn deploy_information(&self) -> Result<&DeployInformation> {
        self.deploy_information
            .as_ref()
            .ok_or_else(|| ConfigError::ConfigFileError("deployInformation is missing".to_string()))
    }

    pub fn invoke_config(&self) -> Result<&InvokeConfig> {
        self.invoke_config
            .as_ref()
            .ok_or_else(|| ConfigError::ConfigFileError("invokeConfig is missing".to_string()))
    }

    /// Resolves the network to use: `name`, else `defaultNet`, else the first one.
    pub fn network(&self, name: Option<&str>) -> Result<(&str, &Network)> {
        let key = match name.or(self.default_net.as_deref()) {
            Some(key) => key,
            None => self
                .networks
                .keys()
                .next()
                .map(String::as_str)
                .ok_or_else(|| ConfigError::ConfigFileError("no networks configured".to_string()))?,
        };
        self.networks
            .get_key_value(key)
            .map(|(key, network)| (key.as_str(), network))
            .ok_or_else(|| ConfigError::ConfigFileError(format!("network '{}' is not configured", key)))
    }

    /// RPC address of the resolved network.
    pub fn network_address(&self, name: Option<&str>) -> Result<String> {
        let (_, network) = self.network(name)?;
        network.address()
    }
}

/// One RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub host: String,
    pub port: u16,
}

impl Network {
    /// `http://host:port`. A host that already carries a scheme keeps it.
    pub fn address(&self) -> Result<String> {
        let base = if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("http://{}", self.host)
        };
        let mut url = Url::parse(&base)
            .map_err(|e| ConfigError::ConfigFileError(format!("invalid host '{}': {}", self.host, e)))?;
        url.set_port(Some(self.port))
            .map_err(|_| ConfigError::ConfigFileError(format!("invalid host '{}'", self.host)))?;
        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}

/// Contract metadata and payer for `punica deploy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployInformation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub need_storage: bool,
    pub payer: String,
    #[serde(default = "default_gas_price", deserialize_with = "deserialize_gas")]
    pub gas_price: u64,
    #[serde(default = "default_gas_limit", deserialize_with = "deserialize_gas")]
    pub gas_limit: u64,
}

/// The `invokeConfig` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeConfig {
    pub abi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_payer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_signer: Option<String>,
    #[serde(default = "default_gas_price", deserialize_with = "deserialize_gas")]
    pub gas_price: u64,
    #[serde(default = "default_gas_limit", deserialize_with = "deserialize_gas")]
    pub gas_limit: u64,
    /// Seconds to wait after each state-changing call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_time: Option<u64>,
    #[serde(default)]
    pub functions: Vec<FunctionCall>,
}

impl InvokeConfig {
    /// Calls keyed by operation. A repeated name keeps its first position and
    /// its last definition.
    pub fn functions_by_name(&self) -> IndexMap<&str, &FunctionCall> {
        let mut by_name = IndexMap::with_capacity(self.functions.len());
        for function in &self.functions {
            by_name.insert(function.operation.as_str(), function);
        }
        by_name
    }
}

/// One configured contract call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCall {
    #[serde(alias = "name")]
    pub operation: String,
    #[serde(default, alias = "params", deserialize_with = "deserialize_args")]
    pub args: Vec<Argument>,
    #[serde(default, alias = "signers", skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    #[serde(default)]
    pub pre_exec: bool,
}

/// Multi-signature requirement of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub m: u32,
    #[serde(default, alias = "signer")]
    pub signers: Vec<String>,
}

/// Address to password map. Values never show up in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Passwords(IndexMap<String, String>);

impl Passwords {
    pub fn get(&self, address: &str) -> Option<&str> {
        self.0.get(address).map(String::as_str)
    }

    pub fn insert(&mut self, address: impl Into<String>, password: impl Into<String>) {
        self.0.insert(address.into(), password.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Passwords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.keys().map(|address| (address, "<redacted>")))
            .finish()
    }
}

fn default_gas_price() -> u64 {
    DEFAULT_GAS_PRICE
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GasValue {
    Number(u64),
    Text(String),
}

fn deserialize_gas<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    match GasValue::deserialize(deserializer)? {
        GasValue::Number(value) => Ok(value),
        GasValue::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid gas value '{}'", text))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArgumentList {
    List(Vec<Argument>),
    Map(IndexMap<String, ParameterValue>),
}

fn deserialize_args<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<Argument>, D::Error> {
    Ok(match ArgumentList::deserialize(deserializer)? {
        ArgumentList::List(arguments) => arguments,
        ArgumentList::Map(entries) => entries
            .into_iter()
            .map(|(name, value)| Argument::new(name, value))
            .collect(),
    })
}
