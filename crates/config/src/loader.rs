//! Project layout resolution and configuration loading.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::project_config::ProjectConfig;
use crate::{
    ConfigError, Result, AVM_EXTENSION, DEFAULT_BUILD_DIR, DEFAULT_CONFIG_FILE, DEFAULT_CONTRACTS_DIR,
    DEFAULT_WALLET_FILE,
};

/// Finds the configuration file of a project.
///
/// An explicit `config` is tried relative to the project first and then
/// under `contracts/`. Without one, `contracts/punica-config.json` is used,
/// falling back to `punica-config.json` at the project root.
pub fn resolve_config_path(project_dir: &Path, config: Option<&str>) -> Result<PathBuf> {
    match config {
        Some(config) => {
            let direct = project_dir.join(config);
            if direct.exists() {
                if !direct.is_file() {
                    return Err(ConfigError::ConfigFileError(format!(
                        "{} is not a file",
                        direct.display()
                    )));
                }
                return Ok(direct);
            }
            let nested = project_dir.join(DEFAULT_CONTRACTS_DIR).join(config);
            if nested.is_file() {
                Ok(nested)
            } else {
                Err(ConfigError::ConfigFileNotFound(nested.display().to_string()))
            }
        }
        None => {
            let nested = project_dir.join(DEFAULT_CONTRACTS_DIR).join(DEFAULT_CONFIG_FILE);
            if nested.is_file() {
                return Ok(nested);
            }
            let root = project_dir.join(DEFAULT_CONFIG_FILE);
            if root.is_file() {
                Ok(root)
            } else {
                Err(ConfigError::ConfigFileNotFound(nested.display().to_string()))
            }
        }
    }
}

/// Reads and parses one configuration file.
pub fn load_config(path: &Path) -> Result<ProjectConfig> {
    let body = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::ConfigFileNotFound(path.display().to_string()),
        _ => ConfigError::ConfigFileError(format!("{}: {}", path.display(), e)),
    })?;
    debug!(target: "punica", path = %path.display(), "loading config");
    serde_json::from_str(&body)
        .map_err(|e| ConfigError::ConfigFileError(format!("{}: {}", path.display(), e)))
}

/// Resolves and loads the configuration of a project.
pub fn load_project_config(project_dir: &Path, config: Option<&str>) -> Result<ProjectConfig> {
    load_config(&resolve_config_path(project_dir, config)?)
}

/// ABI file named by `invokeConfig.abi`: relative to the project when it
/// exists there, otherwise under the build directory.
pub fn resolve_abi_path(project_dir: &Path, abi: &str) -> PathBuf {
    let direct = project_dir.join(abi);
    if direct.is_file() {
        direct
    } else {
        project_dir.join(DEFAULT_BUILD_DIR).join(abi)
    }
}

/// Wallet file of a project, `wallet/wallet.json` by default.
pub fn resolve_wallet_path(project_dir: &Path, wallet: Option<&str>) -> PathBuf {
    project_dir.join(wallet.unwrap_or(DEFAULT_WALLET_FILE))
}

/// Compiled contract to deploy.
///
/// A named file is looked up relative to the project, then in the build
/// directory. Without a name the build directory must hold exactly one
/// `.avm` file.
pub fn resolve_avm_path(project_dir: &Path, avm: Option<&str>) -> Result<PathBuf> {
    let build_dir = project_dir.join(DEFAULT_BUILD_DIR);

    if let Some(avm) = avm {
        let direct = project_dir.join(avm);
        if direct.is_file() {
            return Ok(direct);
        }
        let built = build_dir.join(avm);
        if built.is_file() {
            return Ok(built);
        }
        return Err(ConfigError::AvmFileError(format!("{} does not exist", built.display())));
    }

    if !build_dir.is_dir() {
        return Err(ConfigError::AvmFileError(format!(
            "{} does not exist",
            build_dir.display()
        )));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(&build_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == AVM_EXTENSION) {
            candidates.push(path);
        }
    }

    match candidates.len() {
        1 => Ok(candidates.remove(0)),
        0 => Err(ConfigError::AvmFileError(format!(
            "no .avm file in {}",
            build_dir.display()
        ))),
        _ => Err(ConfigError::AvmFileError(format!(
            "more than one .avm file in {}, choose one with --avm",
            build_dir.display()
        ))),
    }
}
