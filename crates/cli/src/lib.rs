//! punica command-line library
//!
//! Argument parsing, command handlers, the terminal prompt and the JSON-RPC
//! chain client behind the `punica` binary.

pub mod args;
pub mod commands;
pub mod console;
pub mod rpc;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use args::Cli;
pub use commands::{execute, CommandResult};
pub use console::ConsolePrompt;
pub use rpc::RpcChainClient;
