//! Key and address vectors shared with wallet files produced by other Ontology tools.

use punica_cryptography::{Address, KeyPair, PublicKey, ADDRESS_VERSION};

const VECTORS: &[(&str, &str)] = &[
    (
        "11595eb248db36dd449033748cc112c77fb4381f70397aeec2f90c4d4ad60783",
        "AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb",
    ),
    (
        "6a2129b4222fe05af7b35bd27912f7bce2abe8760803613a9fa72a8714d674b0",
        "AbzPjHUCZYwBHRRghZRWfF2ABGg7K9j2bt",
    ),
];

#[test]
fn test_private_keys_derive_known_addresses() {
    for (private_key, address) in VECTORS {
        let key_pair = KeyPair::from_private_key_hex(private_key).expect("valid key");
        assert_eq!(key_pair.address().to_base58(), *address);

        let public_key = PublicKey::from_hex(&key_pair.public_key().to_hex()).expect("public key");
        assert_eq!(public_key.address(), key_pair.address());
    }
}

#[test]
fn test_addresses_start_with_version_byte() {
    for (_, address) in VECTORS {
        let decoded = bs58::decode(address).into_vec().expect("base58");
        assert_eq!(decoded[0], ADDRESS_VERSION);
        assert_eq!(decoded.len(), 25);
    }
}

#[test]
fn test_signature_only_verifies_under_its_key() {
    let first = KeyPair::from_private_key_hex(VECTORS[0].0).expect("valid key");
    let second = KeyPair::from_private_key_hex(VECTORS[1].0).expect("valid key");
    let message = br#"{"contract":"57d4","method":"transfer"}"#;

    let signature = first.sign(message);
    assert!(first.public_key().verify(message, &signature));
    assert!(!second.public_key().verify(message, &signature));
    assert!(!first.public_key().verify(message, &signature[..63]));
}

#[test]
fn test_malformed_addresses() {
    for bad in ["", "AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWw", "0UfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb"] {
        assert!(bad.parse::<Address>().is_err(), "{} should not parse", bad);
    }
}
