// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Session Key Establishment
//!
//! Implements Elliptic Curve Diffie-Hellman key exchange using secp256k1
//! (the same curve used by Ethereum). The client generates an ephemeral
//! keypair per session and derives a shared symmetric key against the
//! gateway's fixed public key. The gateway derives the same key as
//! SHA-256 of the shared-point x-coordinate, so the derivation here must
//! match byte for byte.

use crate::error::{RelayError, Result};
use k256::{elliptic_curve::sec1::FromEncodedPoint, EncodedPoint, PublicKey, SecretKey};
use sha2::{Digest, Sha256};

/// Size of the derived shared key in bytes
pub const SHARED_KEY_SIZE: usize = 32;

/// Derive the session's shared encryption key using ECDH
///
/// Performs ECDH between the client's ephemeral private key and the
/// gateway's public key, then hashes the shared-point x-coordinate with
/// SHA-256 to produce a 32-byte symmetric key.
///
/// Deterministic: the same keypair always yields the same key, with no
/// side effects, so sessions can be re-derived freely in tests.
///
/// # Arguments
///
/// * `ephemeral_private_key` - Client's ephemeral private key (32 bytes)
/// * `gateway_public_key` - Gateway's public key (33 bytes compressed or 65 bytes uncompressed)
///
/// # Returns
///
/// A 32-byte symmetric key suitable for ChaCha20-Poly1305
///
/// # Errors
///
/// Returns `RelayError::KeyAgreement` if either key is malformed. Identity
/// and off-curve point encodings are rejected at parse time, so a
/// degenerate ECDH result cannot be produced.
pub fn derive_shared_key(
    ephemeral_private_key: &[u8],
    gateway_public_key: &[u8],
) -> Result<[u8; SHARED_KEY_SIZE]> {
    // 1. Validate and parse the ephemeral private key (32 bytes)
    if ephemeral_private_key.len() != 32 {
        return Err(RelayError::KeyAgreement {
            key_type: "ephemeral_private_key".to_string(),
            reason: format!("expected 32 bytes, got {}", ephemeral_private_key.len()),
        });
    }

    let secret =
        SecretKey::from_slice(ephemeral_private_key).map_err(|e| RelayError::KeyAgreement {
            key_type: "ephemeral_private_key".to_string(),
            reason: format!("invalid scalar: {}", e),
        })?;

    // 2. Validate and parse the gateway public key
    // Supports both compressed (33 bytes) and uncompressed (65 bytes) formats
    if gateway_public_key.len() != 33 && gateway_public_key.len() != 65 {
        return Err(RelayError::KeyAgreement {
            key_type: "gateway_public_key".to_string(),
            reason: format!("expected 33 or 65 bytes, got {}", gateway_public_key.len()),
        });
    }

    let encoded_point =
        EncodedPoint::from_bytes(gateway_public_key).map_err(|e| RelayError::KeyAgreement {
            key_type: "gateway_public_key".to_string(),
            reason: format!("unparseable point encoding: {}", e),
        })?;

    let gateway_pub = PublicKey::from_encoded_point(&encoded_point);
    let gateway_pub = if gateway_pub.is_some().into() {
        gateway_pub.unwrap()
    } else {
        // Covers off-curve and identity encodings
        return Err(RelayError::KeyAgreement {
            key_type: "gateway_public_key".to_string(),
            reason: "invalid curve point".to_string(),
        });
    };

    // 3. Perform ECDH: shared_point = gateway_pub * ephemeral_secret
    let shared_secret =
        k256::ecdh::diffie_hellman(secret.to_nonzero_scalar(), gateway_pub.as_affine());

    // 4. Shared key = SHA-256(x-coordinate of shared point)
    let digest = Sha256::digest(shared_secret.raw_secret_bytes());
    let mut shared_key = [0u8; SHARED_KEY_SIZE];
    shared_key.copy_from_slice(&digest);

    Ok(shared_key)
}
