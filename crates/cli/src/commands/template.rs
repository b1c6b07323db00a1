use std::fs;
use std::path::Path;

use anyhow::Context;
use punica_config::{load_project_config, resolve_abi_path, resolve_wallet_path};
use punica_invoker::render_template;
use punica_smart_contract::AbiDescriptor;

use super::CommandResult;
use crate::args::TemplateArgs;

/// `punica template`: writes the call template to `--output` or returns it.
pub fn run(project_dir: &Path, args: &TemplateArgs) -> CommandResult {
    let config = load_project_config(project_dir, args.config.as_deref())?;
    let invoke = config.invoke_config()?;

    let abi_file = args.abi.as_deref().unwrap_or(&invoke.abi);
    let abi = AbiDescriptor::load(&resolve_abi_path(project_dir, abi_file))?;
    let wallet_path = resolve_wallet_path(project_dir, args.wallet.as_deref());
    let wallet_path = wallet_path.strip_prefix(project_dir).unwrap_or(&wallet_path);

    let template = render_template(invoke, &abi, wallet_path)?;

    match &args.output {
        Some(output) => {
            let output = project_dir.join(output);
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create {}", parent.display()))?;
            }
            fs::write(&output, &template.content)
                .with_context(|| format!("cannot write {}", output.display()))?;
            Ok(format!(
                "Template written to {} ({} skipped)",
                output.display(),
                template.warnings.len()
            ))
        }
        None => Ok(template.content.trim_end().to_string()),
    }
}
