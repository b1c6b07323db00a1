//! ONT ID identities stored alongside accounts.
//!
//! Punica never unlocks identities; they are kept so that a wallet written
//! back to disk does not lose them.

use serde::{Deserialize, Serialize};

/// A key controlling an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    pub id: String,
    #[serde(default)]
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub salt: String,
    #[serde(rename = "enc-alg", default, skip_serializing_if = "Option::is_none")]
    pub enc_alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub ont_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub lock: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub controls: Vec<Control>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}
