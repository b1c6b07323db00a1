//! Punica Smart Contract Library
//!
//! Contract-facing types used when invoking deployed Ontology contracts:
//! - the ABI descriptor emitted by the contract compiler
//! - configuration parameter values and their typed wire form
//! - the parameter codec reconciling the two

pub mod contract_parameter;
pub mod manifest;
pub mod parameter_codec;

pub use contract_parameter::{Argument, ParameterValue, TypedValue};
pub use manifest::{AbiDescriptor, AbiFunction, AbiParameter, AbiType};
pub use parameter_codec::{
    display_arguments, encode, encode_arguments, encode_for_display,
};

use thiserror::Error;

/// Errors raised while reading an ABI file.
#[derive(Error, Debug)]
pub enum AbiError {
    #[error("abi file not found: {0}")]
    AbiFileNotFound(String),

    #[error("error exist in abi file: {0}")]
    AbiFileError(String),
}

/// Errors raised while encoding configuration values for an ABI function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("params mismatch between config and ABI file for {function}: expected {expected}, got {actual}")]
    ParameterCountMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("missing parameter value for {parameter} of {function}")]
    MissingParameterValue { function: String, parameter: String },

    #[error("unsupported param type {kind} (ABI expects {expected})")]
    UnsupportedParameterType { kind: &'static str, expected: AbiType },

    #[error("cannot encode {value:?}: {reason}")]
    EncodingError { value: String, reason: String },
}

/// Result type for codec operations
pub type CodecResult<T> = std::result::Result<T, CodecError>;
