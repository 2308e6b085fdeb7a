// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Envelope Signing Hash and ECDSA Recovery
//!
//! Computes the hash the wallet signs over the sealed payload and recovers
//! the signer's public key from the resulting 65-byte signature. The wallet
//! is handed the bare keccak of the ciphertext through `personal_sign`; the
//! wallet applies the EIP-191 prefix itself, so recovery runs over
//! `keccak256("\x19Ethereum Signed Message:\n32" || keccak256(ciphertext))`.
//!
//! The prefix is a fixed constant identifying the personal-sign domain.
//! Changing it invalidates every previously issued signature, so it must be
//! versioned if it ever changes.

use crate::error::{RelayError, Result};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use tiny_keccak::{Hasher, Keccak};

/// EIP-191 personal-sign prefix for a 32-byte message
const PERSONAL_SIGN_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute the Keccak-256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut hash = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut hash);
    hash
}

/// Compute the signing hash for a sealed payload
///
/// `keccak256(prefix || keccak256(ciphertext_with_tag))`, binding the
/// signature to the exact ciphertext and to the personal-sign domain.
pub fn signing_hash(ciphertext_with_tag: &[u8]) -> [u8; 32] {
    let ciphertext_hash = keccak256(ciphertext_with_tag);

    let mut hasher = Keccak::v256();
    let mut hash = [0u8; 32];
    hasher.update(PERSONAL_SIGN_PREFIX);
    hasher.update(&ciphertext_hash);
    hasher.finalize(&mut hash);
    hash
}

/// Recover the signer's public key from a signature over a signing hash
///
/// # Arguments
///
/// * `message_hash` - 32-byte hash the signature was produced over
/// * `signature` - 65-byte compact signature (r + s + v); v may be 0/1 or
///   the Ethereum-style 27/28
///
/// # Returns
///
/// The signer's uncompressed public key (65 bytes, 0x04-prefixed)
///
/// # Errors
///
/// Returns `RelayError::SignerRecovery` if the signature or hash has the
/// wrong size, the recovery id is invalid, or recovery itself fails.
pub fn recover_signer(message_hash: &[u8], signature: &[u8]) -> Result<Vec<u8>> {
    if signature.len() != 65 {
        return Err(RelayError::SignerRecovery {
            reason: format!("expected 65-byte signature, got {}", signature.len()),
        });
    }
    if message_hash.len() != 32 {
        return Err(RelayError::SignerRecovery {
            reason: format!("expected 32-byte message hash, got {}", message_hash.len()),
        });
    }

    // Normalize Ethereum-style recovery ids (27/28) to 0/1
    let mut recovery_byte = signature[64];
    if recovery_byte >= 27 {
        recovery_byte -= 27;
    }
    if recovery_byte > 3 {
        return Err(RelayError::SignerRecovery {
            reason: format!("invalid recovery id: {}", signature[64]),
        });
    }

    let recovery_id =
        RecoveryId::try_from(recovery_byte).map_err(|e| RelayError::SignerRecovery {
            reason: format!("invalid recovery id: {}", e),
        })?;

    let parsed =
        Signature::try_from(&signature[..64]).map_err(|e| RelayError::SignerRecovery {
            reason: format!("malformed signature: {}", e),
        })?;

    let verifying_key = VerifyingKey::recover_from_prehash(message_hash, &parsed, recovery_id)
        .map_err(|e| RelayError::SignerRecovery {
            reason: format!("public key recovery failed: {}", e),
        })?;

    Ok(verifying_key.to_encoded_point(false).as_bytes().to_vec())
}

/// Derive the Ethereum address from an uncompressed public key
///
/// Keccak-256 over the 64 coordinate bytes (skipping the 0x04 prefix),
/// taking the last 20 bytes, returned as a lowercase 0x-prefixed hex string.
pub fn public_key_to_address(uncompressed_public_key: &[u8]) -> Result<String> {
    if uncompressed_public_key.len() != 65 || uncompressed_public_key[0] != 0x04 {
        return Err(RelayError::SignerRecovery {
            reason: format!(
                "expected 65-byte uncompressed public key, got {} bytes",
                uncompressed_public_key.len()
            ),
        });
    }

    let hash = keccak256(&uncompressed_public_key[1..]);
    Ok(format!("0x{}", hex::encode(&hash[12..])))
}
