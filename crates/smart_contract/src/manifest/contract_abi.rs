//! AbiDescriptor and the function/parameter descriptors it contains.

use crate::AbiError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Parameter and return types declared by an ABI function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AbiType {
    String,
    Integer,
    Array,
    Boolean,
    ByteArray,
    Struct,
    Map,
    Any,
    Void,
    /// Any type name this tool does not know about, kept verbatim.
    Other(String),
}

impl From<String> for AbiType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "String" => AbiType::String,
            "Integer" => AbiType::Integer,
            "Array" => AbiType::Array,
            "Boolean" => AbiType::Boolean,
            "ByteArray" => AbiType::ByteArray,
            "Struct" => AbiType::Struct,
            "Map" => AbiType::Map,
            "Any" => AbiType::Any,
            "Void" => AbiType::Void,
            _ => AbiType::Other(value),
        }
    }
}

impl From<AbiType> for String {
    fn from(value: AbiType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::String => write!(f, "String"),
            AbiType::Integer => write!(f, "Integer"),
            AbiType::Array => write!(f, "Array"),
            AbiType::Boolean => write!(f, "Boolean"),
            AbiType::ByteArray => write!(f, "ByteArray"),
            AbiType::Struct => write!(f, "Struct"),
            AbiType::Map => write!(f, "Map"),
            AbiType::Any => write!(f, "Any"),
            AbiType::Void => write!(f, "Void"),
            AbiType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A named, typed function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: AbiType,
}

/// A function exported by the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiFunction {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<AbiParameter>,
    #[serde(rename = "returntype", default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<AbiType>,
}

impl AbiFunction {
    pub fn parameter(&self, name: &str) -> Option<&AbiParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// The ABI of a compiled contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AbiDescriptor {
    /// Contract hash, hex encoded.
    #[serde(rename = "hash", default, skip_serializing_if = "Option::is_none")]
    pub contract_hash: Option<String>,
    #[serde(default)]
    pub entrypoint: String,
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    #[serde(default)]
    pub functions: Vec<AbiFunction>,
}

impl AbiDescriptor {
    /// Reads and parses an ABI file.
    pub fn load(path: &Path) -> Result<Self, AbiError> {
        if !path.is_file() {
            return Err(AbiError::AbiFileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AbiError::AbiFileError(format!("{}: {}", path.display(), e)))?;
        if content.trim().is_empty() {
            return Err(AbiError::AbiFileError(format!("{} is empty", path.display())));
        }
        Self::from_json_str(&content)
            .map_err(|e| AbiError::AbiFileError(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// The contract hash with any `0x` prefix removed.
    pub fn contract_hash(&self) -> Result<&str, AbiError> {
        match self.contract_hash.as_deref().map(str::trim) {
            Some(hash) if !hash.is_empty() => Ok(hash.strip_prefix("0x").unwrap_or(hash)),
            _ => Err(AbiError::AbiFileError("missing contract hash".to_string())),
        }
    }

    /// Looks up a function by name. The last declaration wins on duplicates.
    pub fn function(&self, name: &str) -> Option<&AbiFunction> {
        self.functions.iter().rev().find(|f| f.name == name)
    }

    /// Name-keyed view over the exported functions.
    pub fn functions_by_name(&self) -> IndexMap<&str, &AbiFunction> {
        self.functions
            .iter()
            .map(|function| (function.name.as_str(), function))
            .collect()
    }
}
