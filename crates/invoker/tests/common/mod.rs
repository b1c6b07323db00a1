#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use punica_config::ProjectConfig;
use punica_cryptography::KeyPair;
use punica_invoker::{
    ChainClient, ChainResponse, ClientResult, CredentialPrompt, DeploymentRequest, InvocationRequest,
};
use punica_wallets::{
    encrypt_key_pair, Account, CredentialVault, ScryptParameters, ScryptVault, Wallet,
};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const ADDRESS_A: &str = "AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb";
pub const ADDRESS_B: &str = "AbzPjHUCZYwBHRRghZRWfF2ABGg7K9j2bt";
pub const KEY_A: &str = "11595eb248db36dd449033748cc112c77fb4381f70397aeec2f90c4d4ad60783";
pub const KEY_B: &str = "6a2129b4222fe05af7b35bd27912f7bce2abe8760803613a9fa72a8714d674b0";
pub const CONTRACT: &str = "57d448d9c0323bf90d3a535c3eb084e0d34e8d8e";

pub const ABI: &str = r#"{
    "hash": "0x57d448d9c0323bf90d3a535c3eb084e0d34e8d8e",
    "entrypoint": "Main",
    "functions": [
        {"name": "name", "parameters": [], "returntype": "String"},
        {"name": "put", "parameters": [
            {"name": "key", "type": "String"},
            {"name": "value", "type": "Integer"}
        ], "returntype": "Boolean"},
        {"name": "approve", "parameters": [
            {"name": "owner", "type": "ByteArray"}
        ], "returntype": "Boolean"}
    ]
}"#;

/// Temporary project with `contracts/build/demo_abi.json` and
/// `wallet/wallet.json` holding accounts A (pw1) and B (pw2).
pub fn project() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let build = dir.path().join("contracts/build");
    fs::create_dir_all(&build).expect("build dir");
    fs::write(build.join("demo_abi.json"), ABI).expect("abi");
    fs::write(build.join("demo.avm"), "00c56b\n").expect("avm");

    let scrypt = ScryptParameters::test();
    let mut wallet = Wallet::with_scrypt("fixture", scrypt);
    for (key, password) in [(KEY_A, "pw1"), (KEY_B, "pw2")] {
        let key = KeyPair::from_private_key_hex(key).expect("key");
        let account = encrypt_key_pair(&key, None, password, &scrypt).expect("encrypts");
        wallet.add_account(account).expect("added");
    }
    let wallet_dir = dir.path().join("wallet");
    fs::create_dir_all(&wallet_dir).expect("wallet dir");
    fs::write(wallet_dir.join("wallet.json"), wallet.to_json().expect("json")).expect("wallet");
    dir
}

/// Project configuration with the given `functions` array and password map.
pub fn config(functions: &str, passwords: &str) -> ProjectConfig {
    let json = format!(
        r#"{{
            "networks": {{"privateNet": {{"host": "127.0.0.1", "port": 20336}}}},
            "defaultNet": "privateNet",
            "password": {passwords},
            "deployInformation": {{
                "name": "demo", "version": "1.0", "author": "dev", "email": "dev@example.com",
                "desc": "demo contract", "needStorage": true, "payer": "{payer}",
                "gasPrice": 500, "gasLimit": "21000000"
            }},
            "invokeConfig": {{
                "abi": "demo_abi.json",
                "defaultPayer": "{payer}",
                "gasPrice": 500,
                "gasLimit": 20000,
                "functions": {functions}
            }}
        }}"#,
        passwords = passwords,
        payer = ADDRESS_A,
        functions = functions,
    );
    ProjectConfig::from_json(&json).expect("valid config")
}

/// In-memory chain endpoint recording every request.
pub struct StubChain {
    pub deployed: bool,
    pub pre_exec_result: Value,
    pub transaction: Value,
    pub invocations: Mutex<Vec<InvocationRequest>>,
    pub deployments: Mutex<Vec<DeploymentRequest>>,
}

impl StubChain {
    pub fn deployed() -> Self {
        Self {
            deployed: true,
            pre_exec_result: json!({"State": 1, "Result": "6e616d65"}),
            transaction: json!("f1a5c0de"),
            invocations: Mutex::new(Vec::new()),
            deployments: Mutex::new(Vec::new()),
        }
    }

    pub fn not_deployed() -> Self {
        Self {
            deployed: false,
            ..Self::deployed()
        }
    }

    pub fn invocations(&self) -> Vec<InvocationRequest> {
        self.invocations.lock().expect("lock").clone()
    }

    pub fn deployments(&self) -> Vec<DeploymentRequest> {
        self.deployments.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ChainClient for StubChain {
    async fn is_deployed(&self, _contract_hash: &str) -> ClientResult<bool> {
        Ok(self.deployed)
    }

    async fn invoke(&self, request: InvocationRequest) -> ClientResult<ChainResponse> {
        let pre_exec = request.pre_exec;
        self.invocations.lock().expect("lock").push(request);
        if pre_exec {
            Ok(ChainResponse::new(self.pre_exec_result.clone()))
        } else {
            Ok(ChainResponse::new(self.transaction.clone()))
        }
    }

    async fn deploy(&self, request: DeploymentRequest) -> ClientResult<ChainResponse> {
        self.deployments.lock().expect("lock").push(request);
        Ok(ChainResponse::new(self.transaction.clone()))
    }
}

/// Vault recording the passwords it was asked to use.
#[derive(Default)]
pub struct SpyVault {
    pub passwords: Mutex<Vec<String>>,
}

impl SpyVault {
    pub fn passwords(&self) -> Vec<String> {
        self.passwords.lock().expect("lock").clone()
    }
}

impl CredentialVault for SpyVault {
    fn unlock(
        &self,
        account: &Account,
        password: &str,
        scrypt: &ScryptParameters,
    ) -> punica_wallets::Result<KeyPair> {
        self.passwords.lock().expect("lock").push(password.to_string());
        ScryptVault.unlock(account, password, scrypt)
    }
}

/// Prompt answering from a fixed list and counting questions.
pub struct ScriptedPrompt {
    answers: Mutex<Vec<String>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().rev().map(|a| a.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.lock().expect("lock").len()
    }
}

impl CredentialPrompt for ScriptedPrompt {
    fn ask(&self, message: &str) -> io::Result<String> {
        self.asked.lock().expect("lock").push(message.to_string());
        self.answers
            .lock()
            .expect("lock")
            .pop()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no answer"))
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir");
    }
    fs::write(path, content).expect("write");
}
