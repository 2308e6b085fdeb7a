// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ChaCha20-Poly1305 Payload Sealing
//!
//! Authenticated encryption of the serialized relay payload under the
//! session's shared key. The gateway consumes IETF ChaCha20-Poly1305
//! (12-byte nonce, 16-byte tag) with the tag appended to the ciphertext,
//! so sealed output is transported as ciphertext || tag.
//!
//! This module never generates nonces. Nonce freshness under a given key
//! is the submission pipeline's responsibility: a nonce must never be
//! reused with the same shared key.

use crate::error::{RelayError, Result};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};

/// Required nonce size in bytes (IETF ChaCha20-Poly1305)
pub const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size in bytes
pub const TAG_SIZE: usize = 16;

/// Seal a plaintext under the shared key
///
/// # Arguments
///
/// * `shared_key` - 32-byte session key from ECDH
/// * `nonce` - 12-byte nonce, unique per sealing under this key (precondition,
///   enforced by the caller)
/// * `plaintext` - Serialized payload bytes
///
/// # Returns
///
/// Ciphertext with the 16-byte authentication tag appended
///
/// # Errors
///
/// * `RelayError::InvalidNonce` if the nonce is not exactly 12 bytes
/// * `RelayError::Authentication` if the cipher rejects the input
pub fn seal(shared_key: &[u8; 32], nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_nonce(nonce)?;

    let cipher = ChaCha20Poly1305::new(shared_key.into());
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| RelayError::Authentication {
            operation: "seal".to_string(),
            reason: format!("encryption failed: {}", e),
        })
}

/// Open a sealed payload, verifying its authentication tag
///
/// Fails closed: if the tag does not verify (wrong key, wrong nonce, or
/// tampered ciphertext) no plaintext is returned, partial or otherwise.
///
/// # Arguments
///
/// * `shared_key` - 32-byte session key from ECDH
/// * `nonce` - 12-byte nonce the payload was sealed with
/// * `ciphertext_with_tag` - Ciphertext with the 16-byte tag appended
///
/// # Errors
///
/// * `RelayError::InvalidNonce` if the nonce is not exactly 12 bytes
/// * `RelayError::Authentication` on tag verification failure
pub fn open(shared_key: &[u8; 32], nonce: &[u8], ciphertext_with_tag: &[u8]) -> Result<Vec<u8>> {
    check_nonce(nonce)?;

    let cipher = ChaCha20Poly1305::new(shared_key.into());
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext_with_tag)
        .map_err(|e| RelayError::Authentication {
            operation: "open".to_string(),
            reason: format!("authentication tag verification failed: {}", e),
        })
}

fn check_nonce(nonce: &[u8]) -> Result<()> {
    if nonce.len() != NONCE_SIZE {
        return Err(RelayError::InvalidNonce {
            expected: NONCE_SIZE,
            actual: nonce.len(),
        });
    }
    Ok(())
}
