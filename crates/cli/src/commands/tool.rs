//! `punica tool ...` encoding helpers.

use anyhow::{anyhow, Context};
use num_bigint::BigInt;
use punica_cryptography::{Address, KeyPair};
use punica_invoker::CredentialPrompt;
use punica_wallets::{decrypt_private_key, Account, KeyParameters, ScryptParameters};
use zeroize::Zeroizing;

use super::CommandResult;
use crate::args::ToolCommand;

pub fn run(command: &ToolCommand, prompt: &dyn CredentialPrompt) -> CommandResult {
    match command {
        ToolCommand::AddressToHex { address } => address_to_hex(address),
        ToolCommand::StrToHex { value } => Ok(str_to_hex(value)),
        ToolCommand::HexReverse { hex } => hex_reverse(hex),
        ToolCommand::NumToHex { number } => num_to_hex(number),
        ToolCommand::RandomPrivateKey => Ok(random_private_key()),
        ToolCommand::DecryptPrivateKey { key, address, salt, n } => {
            let password = Zeroizing::new(prompt.ask("Please input account password: ")?);
            decrypt_key(key, address, salt, *n, &password)
        }
    }
}

pub fn address_to_hex(address: &str) -> CommandResult {
    let address: Address = address.trim().parse()?;
    Ok(address.to_hex())
}

pub fn str_to_hex(value: &str) -> String {
    hex::encode(value.as_bytes())
}

pub fn hex_reverse(value: &str) -> CommandResult {
    let value = value.trim();
    let mut bytes = hex::decode(value.strip_prefix("0x").unwrap_or(value))
        .with_context(|| format!("{} is not hex", value))?;
    bytes.reverse();
    Ok(hex::encode(bytes))
}

/// Little-endian two's-complement bytes of an arbitrary-size integer.
pub fn num_to_hex(number: &str) -> CommandResult {
    let number: BigInt = number
        .trim()
        .parse()
        .map_err(|e| anyhow!("{} is not an integer: {}", number, e))?;
    Ok(hex::encode(number.to_signed_bytes_le()))
}

pub fn random_private_key() -> String {
    hex::encode(KeyPair::generate().private_key_bytes().as_slice())
}

/// Decrypts a wallet key given its address and salt, with `r = 8`, `p = 8`.
pub fn decrypt_key(key: &str, address: &str, salt: &str, n: u32, password: &str) -> CommandResult {
    let account = Account {
        address: address.to_string(),
        label: String::new(),
        lock: false,
        algorithm: "ECDSA".to_string(),
        parameters: KeyParameters::default(),
        key: key.to_string(),
        enc_alg: punica_wallets::ENCRYPTION_ALGORITHM.to_string(),
        salt: salt.to_string(),
        is_default: false,
        public_key: String::new(),
        signature_scheme: "SHA256withECDSA".to_string(),
        hash: None,
    };
    let scrypt = ScryptParameters::new(n, 8, 8)?;
    let private_key = decrypt_private_key(&account, password, &scrypt)?;
    Ok(hex::encode(private_key.as_slice()))
}
