//! ECDSA key pairs for wallet accounts.

use crate::address::Address;
use crate::{Error, Result};
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::SecretKey;
use rand::rngs::OsRng;
use std::fmt;
use zeroize::Zeroizing;

/// Size of a raw private key in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Size of a compressed public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 33;

/// Size of an `r || s` signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Key algorithm and curve declared by a wallet account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    /// ECDSA over NIST P-256 (secp256r1)
    EcdsaP256,
}

impl KeyAlgorithm {
    pub const ECDSA: &'static str = "ECDSA";
    pub const P256: &'static str = "P-256";
    pub const SIGNATURE_SCHEME: &'static str = "SHA256withECDSA";

    /// Resolves the wallet's `algorithm` and `parameters.curve` labels.
    pub fn from_labels(algorithm: &str, curve: &str) -> Result<Self> {
        match (algorithm, curve) {
            (Self::ECDSA, Self::P256) => Ok(KeyAlgorithm::EcdsaP256),
            _ => Err(Error::UnsupportedAlgorithm(format!("{}/{}", algorithm, curve))),
        }
    }

    pub fn algorithm_label(&self) -> &'static str {
        match self {
            KeyAlgorithm::EcdsaP256 => Self::ECDSA,
        }
    }

    pub fn curve_label(&self) -> &'static str {
        match self {
            KeyAlgorithm::EcdsaP256 => Self::P256,
        }
    }
}

/// A compressed SEC1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = p256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
        Ok(Self::from_point(&point))
    }

    pub fn from_hex(encoded: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(encoded)?)
    }

    fn from_point(point: &p256::PublicKey) -> Self {
        let encoded = point.to_encoded_point(true);
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        bytes.copy_from_slice(encoded.as_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(self)
    }

    /// Verifies a SHA256withECDSA signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(&self.0) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        verifying_key.verify(message, &signature).is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

/// A private/public key pair. The secret scalar is zeroized on drop.
#[derive(Clone)]
pub struct KeyPair {
    secret: SecretKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generates a fresh key pair from the operating system RNG.
    pub fn generate() -> Self {
        Self::from_secret(SecretKey::random(&mut OsRng))
    }

    pub fn from_private_key(private_key: &[u8]) -> Result<Self> {
        if private_key.len() != PRIVATE_KEY_SIZE {
            return Err(Error::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_SIZE,
                private_key.len()
            )));
        }
        let secret = SecretKey::from_slice(private_key)
            .map_err(|_| Error::InvalidPrivateKey("scalar out of range".to_string()))?;
        Ok(Self::from_secret(secret))
    }

    pub fn from_private_key_hex(encoded: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex::decode(encoded.trim())?);
        Self::from_private_key(&bytes)
    }

    fn from_secret(secret: SecretKey) -> Self {
        let public_key = PublicKey::from_point(&secret.public_key());
        Self { secret, public_key }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::EcdsaP256
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn address(&self) -> Address {
        self.public_key.address()
    }

    pub fn private_key_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        bytes.copy_from_slice(&self.secret.to_bytes());
        bytes
    }

    /// Signs `message` with SHA256withECDSA, returning `r || s`.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        let signing_key = SigningKey::from(&self.secret);
        let signature: Signature = signing_key.sign(message);
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes.copy_from_slice(&signature.to_bytes());
        bytes
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str = "11595eb248db36dd449033748cc112c77fb4381f70397aeec2f90c4d4ad60783";

    #[test]
    fn test_from_private_key() {
        let key_pair = KeyPair::from_private_key_hex(PRIVATE_KEY).expect("valid key");
        assert_eq!(
            key_pair.public_key().to_hex(),
            "03a28a94ffeb9b097247ea13fd65051cbce6813f1aaac3b02fc8522ec9d6a6f2ec"
        );
        assert_eq!(key_pair.address().to_base58(), "AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb");
        assert_eq!(hex::encode(*key_pair.private_key_bytes()), PRIVATE_KEY);
    }

    #[test]
    fn test_invalid_private_key() {
        assert!(KeyPair::from_private_key(&[1u8; 31]).is_err());
        assert!(KeyPair::from_private_key(&[0u8; 32]).is_err());
        assert!(KeyPair::from_private_key(&[0xffu8; 32]).is_err());
    }

    #[test]
    fn test_non_hex_private_key() {
        let err = KeyPair::from_private_key_hex("zz").expect_err("not hex");
        assert!(matches!(err, Error::HexDecode(_)));
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn test_sign_and_verify() {
        let key_pair = KeyPair::generate();
        let signature = key_pair.sign(b"invoke transfer");
        assert!(key_pair.public_key().verify(b"invoke transfer", &signature));
        assert!(!key_pair.public_key().verify(b"invoke approve", &signature));
    }

    #[test]
    fn test_debug_hides_secret() {
        let key_pair = KeyPair::from_private_key_hex(PRIVATE_KEY).expect("valid key");
        let debug = format!("{:?}", key_pair);
        assert!(!debug.contains(PRIVATE_KEY));
    }

    #[test]
    fn test_algorithm_labels() {
        assert_eq!(
            KeyAlgorithm::from_labels("ECDSA", "P-256").expect("supported"),
            KeyAlgorithm::EcdsaP256
        );
        assert!(KeyAlgorithm::from_labels("SM2", "sm2p256v1").is_err());
    }
}
