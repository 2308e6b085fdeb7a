//! Session key establishment tests
//!
//! The shared key must be a deterministic function of the two keys, agree
//! between both sides of the exchange, and reject malformed key material.

use fabstir_relay_client::config::gateway::decode_gateway_key;
use fabstir_relay_client::config::GATEWAY_PUBLIC_KEY_B64;
use fabstir_relay_client::{derive_shared_key, RelayError};
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use rand::rngs::OsRng;

#[test]
fn test_derivation_is_deterministic() {
    let client = SecretKey::random(&mut OsRng);
    let gateway = SecretKey::random(&mut OsRng);
    let gateway_pub = gateway.public_key().to_encoded_point(true);

    let k1 = derive_shared_key(&client.to_bytes(), gateway_pub.as_bytes()).unwrap();
    let k2 = derive_shared_key(&client.to_bytes(), gateway_pub.as_bytes()).unwrap();

    assert_eq!(k1.len(), 32, "Shared key must be 32 bytes");
    assert_eq!(k1, k2, "Derivation should be deterministic");
}

#[test]
fn test_both_sides_agree() {
    // ECDH symmetry: client(priv) x gateway(pub) == gateway(priv) x client(pub)
    let client = SecretKey::random(&mut OsRng);
    let gateway = SecretKey::random(&mut OsRng);

    let client_pub = client.public_key().to_encoded_point(true);
    let gateway_pub = gateway.public_key().to_encoded_point(true);

    let client_side = derive_shared_key(&client.to_bytes(), gateway_pub.as_bytes()).unwrap();
    let gateway_side = derive_shared_key(&gateway.to_bytes(), client_pub.as_bytes()).unwrap();

    assert_eq!(client_side, gateway_side);
}

#[test]
fn test_uncompressed_gateway_key_accepted() {
    let client = SecretKey::random(&mut OsRng);
    let gateway = SecretKey::random(&mut OsRng);

    let compressed = gateway.public_key().to_encoded_point(true);
    let uncompressed = gateway.public_key().to_encoded_point(false);

    let k1 = derive_shared_key(&client.to_bytes(), compressed.as_bytes()).unwrap();
    let k2 = derive_shared_key(&client.to_bytes(), uncompressed.as_bytes()).unwrap();
    assert_eq!(k1, k2, "Point encoding must not change the derived key");
}

#[test]
fn test_deployed_gateway_key_is_usable() {
    let gateway_pub = decode_gateway_key(GATEWAY_PUBLIC_KEY_B64).unwrap();
    let client = SecretKey::random(&mut OsRng);

    let result = derive_shared_key(&client.to_bytes(), &gateway_pub);
    assert!(result.is_ok(), "Deployed gateway key should derive a session key");
}

#[test]
fn test_rejects_wrong_private_key_size() {
    let gateway = SecretKey::random(&mut OsRng);
    let gateway_pub = gateway.public_key().to_encoded_point(true);

    let result = derive_shared_key(&[0u8; 16], gateway_pub.as_bytes());
    assert!(matches!(result, Err(RelayError::KeyAgreement { .. })));
}

#[test]
fn test_rejects_zero_scalar() {
    let gateway = SecretKey::random(&mut OsRng);
    let gateway_pub = gateway.public_key().to_encoded_point(true);

    // Zero is not a valid secp256k1 scalar
    let result = derive_shared_key(&[0u8; 32], gateway_pub.as_bytes());
    assert!(matches!(result, Err(RelayError::KeyAgreement { .. })));
}

#[test]
fn test_rejects_wrong_public_key_size() {
    let client = SecretKey::random(&mut OsRng);
    let result = derive_shared_key(&client.to_bytes(), &[0x02; 20]);
    assert!(matches!(result, Err(RelayError::KeyAgreement { .. })));
}

#[test]
fn test_rejects_off_curve_point() {
    let client = SecretKey::random(&mut OsRng);
    let result = derive_shared_key(&client.to_bytes(), &[0xFF; 33]);
    assert!(matches!(result, Err(RelayError::KeyAgreement { .. })));
}

#[test]
fn test_rejects_identity_encoding() {
    let client = SecretKey::random(&mut OsRng);
    // SEC1 identity encoding is the single byte 0x00; a 33-byte all-zero
    // string is likewise not a valid point
    let result = derive_shared_key(&client.to_bytes(), &[0x00; 33]);
    assert!(matches!(result, Err(RelayError::KeyAgreement { .. })));
}
