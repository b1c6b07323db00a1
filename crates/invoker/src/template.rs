//! Human-readable call script generated from the invoke configuration.

use std::fmt::Write as _;
use std::path::Path;

use punica_config::InvokeConfig;
use punica_smart_contract::{display_arguments, AbiDescriptor};
use tracing::{info, warn};

use crate::error::{InvokeError, Result};

/// A rendered call script and the calls that were left out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTemplate {
    pub content: String,
    pub warnings: Vec<String>,
}

/// Renders one block per configured call, in configuration order.
///
/// Calls that are not in the ABI, whose arguments do not encode, or that
/// have no payer are skipped with a warning. Passwords are never written.
pub fn render_template(config: &InvokeConfig, abi: &AbiDescriptor, wallet_path: &Path) -> Result<CallTemplate> {
    let contract = abi.contract_hash()?;
    let exported = abi.functions_by_name();

    let mut content = String::new();
    let _ = writeln!(content, "# punica call template");
    let _ = writeln!(content, "contract = \"{}\"", contract);
    let _ = writeln!(content, "wallet = \"{}\"", wallet_path.display());
    let _ = writeln!(content, "gasPrice = {}", config.gas_price);
    let _ = writeln!(content, "gasLimit = {}", config.gas_limit);

    let mut warnings = Vec::new();
    for (name, call) in config.functions_by_name() {
        let block = exported
            .get(name)
            .ok_or_else(|| InvokeError::FunctionNotInAbi(name.to_string()))
            .and_then(|function| {
                info!(target: "punica", function = %name, "Generating call for {}...", name);
                let arguments = display_arguments(&call.args, function)?;
                let mut block = String::new();
                let _ = writeln!(block, "\n[{}]", name);
                if call.pre_exec {
                    let _ = writeln!(block, "preExec = true");
                } else {
                    let payer = call
                        .payer
                        .as_deref()
                        .or(config.default_payer.as_deref())
                        .filter(|payer| !payer.is_empty())
                        .ok_or_else(|| InvokeError::MissingPayer(name.to_string()))?;
                    let _ = writeln!(block, "payer = \"{}\"", payer);
                    if let Some(signature) = &call.signature {
                        let signers: Vec<String> =
                            signature.signers.iter().map(|s| format!("\"{}\"", s)).collect();
                        let _ = writeln!(block, "signature = {{ m = {}, signers = [{}] }}", signature.m, signers.join(", "));
                    }
                }
                let _ = writeln!(block, "call = {}({})", function.name, arguments.join(", "));
                Ok(block)
            });

        match block {
            Ok(block) => content.push_str(&block),
            Err(e) => {
                warn!(target: "punica", function = %name, "Skipping {}: {}", name, e);
                warnings.push(format!("{}: {}", name, e));
            }
        }
    }

    Ok(CallTemplate { content, warnings })
}
