//! Invocation envelope signing.
//!
//! The signed message is the compact JSON of the envelope with a fixed field
//! order. Each witness is a SHA256withECDSA signature over that message.

use punica_cryptography::hash::sha256;
use punica_cryptography::KeyPair;
use punica_smart_contract::TypedValue;
use serde::Serialize;

use crate::client::{DeploymentRequest, Witness};
use crate::error::{InvokeError, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    contract: &'a str,
    method: &'a str,
    parameters: &'a [TypedValue],
    gas_price: u64,
    gas_limit: u64,
    payer: &'a str,
}

/// Message signed for a state-changing call.
pub fn envelope_message(
    contract: &str,
    method: &str,
    parameters: &[TypedValue],
    gas_price: u64,
    gas_limit: u64,
    payer: &str,
) -> Result<Vec<u8>> {
    let envelope = Envelope {
        contract,
        method,
        parameters,
        gas_price,
        gas_limit,
        payer,
    };
    serde_json::to_vec(&envelope).map_err(|e| InvokeError::SubmissionFailed {
        function: method.to_string(),
        reason: format!("cannot encode envelope: {}", e),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentEnvelope<'a> {
    code: &'a str,
    name: &'a str,
    version: &'a str,
    author: &'a str,
    email: &'a str,
    description: &'a str,
    need_storage: bool,
    gas_price: u64,
    gas_limit: u64,
    payer: &'a str,
}

/// Message signed for a deployment: the request without its witnesses.
pub fn deployment_message(request: &DeploymentRequest) -> Result<Vec<u8>> {
    let envelope = DeploymentEnvelope {
        code: &request.code,
        name: &request.name,
        version: &request.version,
        author: &request.author,
        email: &request.email,
        description: &request.description,
        need_storage: request.need_storage,
        gas_price: request.gas_price,
        gas_limit: request.gas_limit,
        payer: &request.payer,
    };
    serde_json::to_vec(&envelope).map_err(|e| InvokeError::SubmissionFailed {
        function: request.name.clone(),
        reason: format!("cannot encode deployment: {}", e),
    })
}

/// SHA-256 of a signed message, for log correlation.
pub fn envelope_digest(message: &[u8]) -> String {
    hex::encode(sha256(message))
}

/// Signs `message` with every key, in order.
pub fn sign_message(message: &[u8], keys: &[KeyPair]) -> Vec<Witness> {
    keys.iter()
        .map(|key| Witness {
            public_key: key.public_key().to_hex(),
            signature: hex::encode(key.sign(message)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use punica_cryptography::PublicKey;

    #[test]
    fn test_envelope_is_stable() {
        let parameters = vec![TypedValue::ByteArray(vec![0x01]), TypedValue::Integer(10.into())];
        let first = envelope_message("57d4", "transfer", &parameters, 500, 20000, "AUfe").expect("encodes");
        let second = envelope_message("57d4", "transfer", &parameters, 500, 20000, "AUfe").expect("encodes");
        assert_eq!(first, second);
        assert_eq!(
            String::from_utf8(first).expect("utf8"),
            r#"{"contract":"57d4","method":"transfer","parameters":[{"type":"ByteArray","value":"01"},{"type":"Integer","value":10}],"gasPrice":500,"gasLimit":20000,"payer":"AUfe"}"#
        );
    }

    #[test]
    fn test_witnesses_verify() {
        let payer = KeyPair::generate();
        let signer = KeyPair::generate();
        let message = envelope_message("57d4", "approve", &[], 500, 20000, "AUfe").expect("encodes");

        let witnesses = sign_message(&message, &[payer.clone(), signer.clone()]);
        assert_eq!(witnesses.len(), 2);
        assert_eq!(witnesses[0].public_key, payer.public_key().to_hex());

        for witness in &witnesses {
            let key = PublicKey::from_hex(&witness.public_key).expect("public key");
            let signature = hex::decode(&witness.signature).expect("hex signature");
            assert!(key.verify(&message, &signature));
        }
        assert_eq!(envelope_digest(&message).len(), 64);
    }
}
