//! End-to-end scenarios through the facade crate.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use punica_rs::invoker::{ChainResponse, ClientResult, DeploymentRequest, InvocationRequest};
use punica_rs::prelude::*;
use punica_rs::smart_contract::{encode, AbiType, CodecError};
use punica_rs::wallets::{decrypt_private_key, CredentialVault, ScryptVault};
use serde_json::json;
use tempfile::TempDir;

const KEY_A: &str = "11595eb248db36dd449033748cc112c77fb4381f70397aeec2f90c4d4ad60783";
const ADDRESS_A: &str = "AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb";

const ABI: &str = r#"{
    "hash": "0x57d448d9c0323bf90d3a535c3eb084e0d34e8d8e",
    "entrypoint": "Main",
    "events": [],
    "functions": [
        {"name": "name", "parameters": [], "returntype": "String"},
        {"name": "transfer", "parameters": [
            {"name": "from", "type": "ByteArray"},
            {"name": "amount", "type": "Integer"}
        ], "returntype": "Boolean"}
    ]
}"#;

struct AcceptingChain {
    invocations: Mutex<Vec<InvocationRequest>>,
}

impl AcceptingChain {
    fn new() -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.invocations.lock().expect("lock").len()
    }
}

#[async_trait]
impl ChainClient for AcceptingChain {
    async fn is_deployed(&self, _contract_hash: &str) -> ClientResult<bool> {
        Ok(true)
    }

    async fn invoke(&self, request: InvocationRequest) -> ClientResult<ChainResponse> {
        let pre_exec = request.pre_exec;
        self.invocations.lock().expect("lock").push(request);
        Ok(ChainResponse::new(if pre_exec {
            json!({"State": 1, "Result": "01"})
        } else {
            json!("09f2a7c1")
        }))
    }

    async fn deploy(&self, _request: DeploymentRequest) -> ClientResult<ChainResponse> {
        Ok(ChainResponse::new(json!("09f2a7c1")))
    }
}

#[derive(Default)]
struct CountingVault {
    passwords: Mutex<Vec<String>>,
}

impl CredentialVault for CountingVault {
    fn unlock(
        &self,
        account: &Account,
        password: &str,
        scrypt: &ScryptParameters,
    ) -> punica_rs::wallets::Result<KeyPair> {
        self.passwords.lock().expect("lock").push(password.to_string());
        ScryptVault.unlock(account, password, scrypt)
    }
}

/// Project whose wallet holds account A under "pw1".
fn project() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let build = dir.path().join("contracts/build");
    fs::create_dir_all(&build).expect("build dir");
    fs::write(build.join("token_abi.json"), ABI).expect("abi");

    let wallet_path = dir.path().join("wallet/wallet.json");
    let mut manager =
        WalletManager::create_with_scrypt(&wallet_path, ScryptParameters::test()).expect("wallet");
    manager.import_account(KEY_A, "pw1").expect("import");
    dir
}

fn write_config(project: &Path, functions: &str) -> ProjectConfig {
    let json = format!(
        r#"{{
            "networks": {{"testNet": {{"host": "polaris1.ont.io", "port": 20336}}}},
            "password": {{"{payer}": "pw1"}},
            "invokeConfig": {{
                "abi": "token_abi.json",
                "defaultPayer": "{payer}",
                "gasPrice": "500",
                "gasLimit": "20000",
                "functions": {functions}
            }}
        }}"#,
        payer = ADDRESS_A,
        functions = functions,
    );
    fs::write(project.join("contracts/punica-config.json"), json).expect("config");
    load_project_config(project, None).expect("loads")
}

fn options(project: &TempDir) -> InvokeOptions {
    InvokeOptions {
        project_dir: project.path().to_path_buf(),
        ..InvokeOptions::default()
    }
}

#[test]
fn test_codec_is_deterministic() {
    let values = [
        json!("ByteArray:0a0b"),
        json!("String:hello"),
        json!("Address:AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb"),
        json!("cafe"),
        json!(42),
        json!(true),
        json!(["01", "String:x"]),
        json!({"k": "String:v"}),
    ];
    for value in values {
        let parsed: ParameterValue = serde_json::from_value(value).expect("parameter value");
        let first = encode(&parsed, &AbiType::ByteArray).expect("encodes");
        let second = encode(&parsed, &AbiType::ByteArray).expect("encodes");
        assert_eq!(first, second);
    }

    let address: ParameterValue = serde_json::from_value(json!("Address:AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb"))
        .expect("parameter value");
    let key = KeyPair::from_private_key_hex(KEY_A).expect("key");
    assert_eq!(
        encode(&address, &AbiType::ByteArray).expect("encodes"),
        TypedValue::ByteArray(key.address().as_bytes().to_vec())
    );
}

#[test]
fn test_vault_round_trip_through_wallet() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("wallet.json");
    let mut manager = WalletManager::create_with_scrypt(&path, ScryptParameters::test()).expect("wallet");
    let account = manager.import_account(KEY_A, "pw1").expect("import").clone();

    let reopened = WalletManager::open(&path).expect("reopens");
    let scrypt = *reopened.scrypt();
    let stored = reopened.account(&account.address).expect("stored");
    let private_key = decrypt_private_key(stored, "pw1", &scrypt).expect("decrypts");
    assert_eq!(hex::encode(private_key.as_slice()), KEY_A);

    for wrong in ["pw2", "", "PW1"] {
        let err = decrypt_private_key(stored, wrong, &scrypt).expect_err("wrong password");
        assert!(err.is_wrong_password());
    }
}

#[test]
fn test_salt_encodings_decrypt_alike() {
    let scrypt = ScryptParameters::test();
    let account: Account = serde_json::from_value(json!({
        "address": ADDRESS_A,
        "label": "a",
        "lock": false,
        "algorithm": "ECDSA",
        "parameters": {"curve": "P-256"},
        "key": "3fnVDuHYaeNGyrdrk4zDkFDHgVmA+lOuc5Tkh3u6aMKjzW3w2ALyuFz2ppt0UYot",
        "enc-alg": "aes-256-gcm",
        "salt": "AAECAwQFBgcICQoLDA0ODw==",
        "isDefault": true,
        "publicKey": "03a28a94",
        "signatureScheme": "SHA256withECDSA"
    }))
    .expect("account");
    let mut hex_salted = account.clone();
    hex_salted.salt = "000102030405060708090a0b0c0d0e0f".to_string();

    let from_base64 = decrypt_private_key(&account, "pw1", &scrypt).expect("base64 salt");
    let from_hex = decrypt_private_key(&hex_salted, "pw1", &scrypt).expect("hex salt");
    assert_eq!(*from_base64, *from_hex);
    assert_eq!(hex::encode(from_hex.as_slice()), KEY_A);
}

#[tokio::test]
async fn test_missing_abi_function_is_isolated() {
    let project = project();
    let config = write_config(
        project.path(),
        r#"[
            {"operation": "name", "args": [], "preExec": true},
            {"operation": "mint", "args": []},
            {"operation": "transfer", "args": [
                {"name": "amount", "value": 100},
                {"name": "from", "value": "Address:AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb"}
            ]}
        ]"#,
    );
    let chain = Arc::new(AcceptingChain::new());
    let invoker = Invoker::new(chain.clone(), Arc::new(NoPrompt));
    let mut context = ExecutionContext::new().with_inter_call_delay(Duration::ZERO);

    let report = invoker
        .invoke(&config, &options(&project), &mut context)
        .await
        .expect("batch runs");

    let order: Vec<&str> = report.iter().map(|o| o.function.as_str()).collect();
    assert_eq!(order, vec!["name", "mint", "transfer"]);
    assert_eq!(report.successes().count(), 2);
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0].error(), Some(InvokeError::FunctionNotInAbi(name)) if name == "mint"));
    assert_eq!(chain.calls(), 2);
}

#[tokio::test]
async fn test_count_mismatch_skips_chain() {
    let project = project();
    let config = write_config(
        project.path(),
        r#"[{"operation": "transfer", "args": [{"name": "amount", "value": 1}]}]"#,
    );
    let chain = Arc::new(AcceptingChain::new());
    let invoker = Invoker::new(chain.clone(), Arc::new(NoPrompt));

    let report = invoker
        .invoke(&config, &options(&project), &mut ExecutionContext::new())
        .await
        .expect("batch runs");

    assert!(matches!(
        report.outcomes[0].error(),
        Some(InvokeError::Codec(CodecError::ParameterCountMismatch { .. }))
    ));
    assert_eq!(chain.calls(), 0);
}

#[tokio::test]
async fn test_configured_password_end_to_end() {
    let project = project();
    let config = write_config(
        project.path(),
        r#"[{"operation": "transfer", "args": [
            {"name": "from", "value": "Address:AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb"},
            {"name": "amount", "value": 5}
        ]}]"#,
    );
    let chain = Arc::new(AcceptingChain::new());
    let vault = Arc::new(CountingVault::default());
    let invoker = Invoker::new(chain.clone(), Arc::new(NoPrompt)).with_vault(vault.clone());

    let report = invoker
        .invoke(&config, &options(&project), &mut ExecutionContext::new())
        .await
        .expect("batch runs");

    assert_eq!(report.len(), 1);
    assert_eq!(report.outcomes[0].transaction(), Some("09f2a7c1"));
    assert_eq!(*vault.passwords.lock().expect("lock"), vec!["pw1".to_string()]);
    assert_eq!(chain.calls(), 1);
}
