//! Parameter codec.
//!
//! Values are encoded by their own tag, not by the declared ABI type; the ABI
//! type only shows up in diagnostics. Arguments are matched to ABI parameters
//! by name, so their order in the configuration does not matter.

use crate::contract_parameter::{Argument, ParameterValue, TypedValue};
use crate::manifest::{AbiFunction, AbiType};
use crate::{CodecError, CodecResult};
use indexmap::IndexMap;
use punica_cryptography::Address;

/// Encodes one configuration value for a parameter of type `expected`.
pub fn encode(value: &ParameterValue, expected: &AbiType) -> CodecResult<TypedValue> {
    match value {
        ParameterValue::Boolean(b) => Ok(TypedValue::Boolean(*b)),
        ParameterValue::Number(n) => Ok(TypedValue::Integer(n.clone())),
        ParameterValue::ByteArray(hex) | ParameterValue::Hex(hex) => {
            decode_hex(hex).map(TypedValue::ByteArray)
        }
        ParameterValue::String(text) => Ok(TypedValue::ByteArray(text.as_bytes().to_vec())),
        ParameterValue::Address(encoded) => {
            decode_address(encoded).map(|address| TypedValue::ByteArray(address.as_bytes().to_vec()))
        }
        ParameterValue::Array(items) => items
            .iter()
            .map(|item| encode(item, expected))
            .collect::<CodecResult<Vec<_>>>()
            .map(TypedValue::Array),
        ParameterValue::Object(entries) => entries
            .iter()
            .map(|(key, item)| -> CodecResult<(String, TypedValue)> {
                Ok((key.clone(), encode(item, expected)?))
            })
            .collect::<CodecResult<IndexMap<_, _>>>()
            .map(TypedValue::Map),
        ParameterValue::Null => Err(CodecError::UnsupportedParameterType {
            kind: value.kind(),
            expected: expected.clone(),
        }),
    }
}

/// Renders one configuration value the way a call template shows it.
pub fn encode_for_display(value: &ParameterValue, expected: &AbiType) -> CodecResult<String> {
    match value {
        ParameterValue::Boolean(b) => Ok(b.to_string()),
        ParameterValue::Number(n) => Ok(n.to_string()),
        ParameterValue::ByteArray(hex) | ParameterValue::Hex(hex) => {
            decode_hex(hex).map(|bytes| format!("0x{}", hex::encode(bytes)))
        }
        ParameterValue::String(text) => Ok(quote(text)),
        ParameterValue::Address(encoded) => {
            decode_address(encoded).map(|address| format!("0x{}", address.to_hex()))
        }
        ParameterValue::Array(items) => {
            let rendered = items
                .iter()
                .map(|item| encode_for_display(item, expected))
                .collect::<CodecResult<Vec<_>>>()?;
            Ok(format!("[{}]", rendered.join(", ")))
        }
        ParameterValue::Object(entries) => {
            let rendered = entries
                .iter()
                .map(|(key, item)| -> CodecResult<String> {
                    Ok(format!("{}: {}", quote(key), encode_for_display(item, expected)?))
                })
                .collect::<CodecResult<Vec<_>>>()?;
            Ok(format!("{{{}}}", rendered.join(", ")))
        }
        ParameterValue::Null => Err(CodecError::UnsupportedParameterType {
            kind: value.kind(),
            expected: expected.clone(),
        }),
    }
}

/// Encodes the configured arguments of a call in ABI parameter order.
pub fn encode_arguments(arguments: &[Argument], function: &AbiFunction) -> CodecResult<Vec<TypedValue>> {
    map_arguments(arguments, function, encode)
}

/// Display counterpart of [`encode_arguments`].
pub fn display_arguments(arguments: &[Argument], function: &AbiFunction) -> CodecResult<Vec<String>> {
    map_arguments(arguments, function, encode_for_display)
}

fn map_arguments<T>(
    arguments: &[Argument],
    function: &AbiFunction,
    convert: impl Fn(&ParameterValue, &AbiType) -> CodecResult<T>,
) -> CodecResult<Vec<T>> {
    if arguments.len() != function.parameters.len() {
        return Err(CodecError::ParameterCountMismatch {
            function: function.name.clone(),
            expected: function.parameters.len(),
            actual: arguments.len(),
        });
    }

    function
        .parameters
        .iter()
        .map(|parameter| {
            let argument = arguments
                .iter()
                .find(|argument| argument.name == parameter.name)
                .ok_or_else(|| CodecError::MissingParameterValue {
                    function: function.name.clone(),
                    parameter: parameter.name.clone(),
                })?;
            convert(&argument.value, &parameter.parameter_type)
        })
        .collect()
}

fn decode_hex(encoded: &str) -> CodecResult<Vec<u8>> {
    hex::decode(encoded).map_err(|e| CodecError::EncodingError {
        value: encoded.to_string(),
        reason: e.to_string(),
    })
}

fn decode_address(encoded: &str) -> CodecResult<Address> {
    Address::from_base58(encoded).map_err(|e| CodecError::EncodingError {
        value: encoded.to_string(),
        reason: e.to_string(),
    })
}

fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}
