//! Invocation parameter values.
//!
//! [`ParameterValue`] is what the invoke configuration says; [`TypedValue`] is
//! what the chain client receives after the codec has run. String values are
//! classified by their type prefix once, when the configuration is parsed.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Prefix marking a hex encoded byte array.
pub const BYTE_ARRAY_PREFIX: &str = "ByteArray:";
/// Prefix marking a UTF-8 string.
pub const STRING_PREFIX: &str = "String:";
/// Prefix marking a base58 account address.
pub const ADDRESS_PREFIX: &str = "Address:";

/// A configuration value for one function argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// JSON `null`, which no ABI type accepts.
    Null,
    Boolean(bool),
    Number(Number),
    /// Hex payload of a `ByteArray:` string.
    ByteArray(String),
    /// Text of a `String:` string.
    String(String),
    /// Base58 address of an `Address:` string.
    Address(String),
    /// A string without a known prefix, read as hex.
    Hex(String),
    Array(Vec<ParameterValue>),
    Object(IndexMap<String, ParameterValue>),
}

impl ParameterValue {
    /// Classifies a configuration string by its prefix.
    pub fn from_tagged_str(raw: &str) -> Self {
        if let Some(hex) = raw.strip_prefix(BYTE_ARRAY_PREFIX) {
            ParameterValue::ByteArray(hex.to_string())
        } else if let Some(text) = raw.strip_prefix(STRING_PREFIX) {
            ParameterValue::String(text.to_string())
        } else if let Some(address) = raw.strip_prefix(ADDRESS_PREFIX) {
            ParameterValue::Address(address.to_string())
        } else {
            ParameterValue::Hex(raw.to_string())
        }
    }

    /// Short name of the value's shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ParameterValue::Null => "null",
            ParameterValue::Boolean(_) => "boolean",
            ParameterValue::Number(_) => "number",
            ParameterValue::ByteArray(_) => "byte array",
            ParameterValue::String(_) => "string",
            ParameterValue::Address(_) => "address",
            ParameterValue::Hex(_) => "hex string",
            ParameterValue::Array(_) => "array",
            ParameterValue::Object(_) => "object",
        }
    }

    /// Converts back to the configuration JSON form, prefixes included.
    pub fn to_json(&self) -> Value {
        match self {
            ParameterValue::Null => Value::Null,
            ParameterValue::Boolean(b) => Value::Bool(*b),
            ParameterValue::Number(n) => Value::Number(n.clone()),
            ParameterValue::ByteArray(hex) => Value::String(format!("{}{}", BYTE_ARRAY_PREFIX, hex)),
            ParameterValue::String(text) => Value::String(format!("{}{}", STRING_PREFIX, text)),
            ParameterValue::Address(address) => {
                Value::String(format!("{}{}", ADDRESS_PREFIX, address))
            }
            ParameterValue::Hex(hex) => Value::String(hex.clone()),
            ParameterValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            ParameterValue::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for ParameterValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ParameterValue::Null,
            Value::Bool(b) => ParameterValue::Boolean(b),
            Value::Number(n) => ParameterValue::Number(n),
            Value::String(s) => ParameterValue::from_tagged_str(&s),
            Value::Array(items) => {
                ParameterValue::Array(items.into_iter().map(ParameterValue::from).collect())
            }
            Value::Object(entries) => ParameterValue::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, ParameterValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for ParameterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ParameterValue::from)
    }
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A named argument of a configured function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: ParameterValue,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: ParameterValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// An encoded parameter, ready for the chain client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum TypedValue {
    Boolean(bool),
    Integer(Number),
    ByteArray(#[serde(serialize_with = "serialize_hex")] Vec<u8>),
    Array(Vec<TypedValue>),
    Map(IndexMap<String, TypedValue>),
}

impl TypedValue {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TypedValue::ByteArray(bytes) => Some(bytes),
            _ => None,
        }
    }
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefix_classification() {
        assert_eq!(
            ParameterValue::from_tagged_str("ByteArray:0a0b"),
            ParameterValue::ByteArray("0a0b".to_string())
        );
        assert_eq!(
            ParameterValue::from_tagged_str("String:hello"),
            ParameterValue::String("hello".to_string())
        );
        assert_eq!(
            ParameterValue::from_tagged_str("Address:AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb"),
            ParameterValue::Address("AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb".to_string())
        );
        assert_eq!(
            ParameterValue::from_tagged_str("c0ffee"),
            ParameterValue::Hex("c0ffee".to_string())
        );
    }

    #[test]
    fn test_parse_nested_config_value() {
        let value: ParameterValue = serde_json::from_value(json!({
            "owner": "Address:AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb",
            "amounts": [1, 2, true],
            "memo": null
        }))
        .expect("valid value");

        let ParameterValue::Object(entries) = value else {
            panic!("expected object");
        };
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["owner", "amounts", "memo"]);
        assert_eq!(entries["memo"], ParameterValue::Null);
        assert!(matches!(&entries["amounts"], ParameterValue::Array(items) if items.len() == 3));
    }

    #[test]
    fn test_serialize_restores_prefixes() {
        let value = ParameterValue::Array(vec![
            ParameterValue::String("hi".to_string()),
            ParameterValue::ByteArray("ff".to_string()),
        ]);
        assert_eq!(
            serde_json::to_value(&value).expect("serialize"),
            json!(["String:hi", "ByteArray:ff"])
        );
    }

    #[test]
    fn test_typed_value_json_form() {
        let value = TypedValue::Array(vec![
            TypedValue::ByteArray(vec![0xde, 0xad]),
            TypedValue::Boolean(true),
        ]);
        assert_eq!(
            serde_json::to_value(&value).expect("serialize"),
            json!({"type": "Array", "value": [
                {"type": "ByteArray", "value": "dead"},
                {"type": "Boolean", "value": true}
            ]})
        );
    }
}
