//! Contract ABI module.
//!
//! The ABI file is produced next to the compiled AVM and describes the
//! functions a deployed contract exports.

pub mod contract_abi;

pub use contract_abi::{AbiDescriptor, AbiFunction, AbiParameter, AbiType};
