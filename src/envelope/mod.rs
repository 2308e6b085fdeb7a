// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay Envelope Assembly
//!
//! Packs the sealed payload, nonce, signature, and routing metadata into
//! the canonical record the router contract consumes. Assembly is
//! all-or-nothing: every cross-field invariant is checked before an
//! envelope exists, so partially-signed or partially-sealed data can never
//! be encoded for submission.

pub mod abi;
pub mod payload;

use crate::config::GatewayConfig;
use crate::crypto::{recover_signer, signing_hash, NONCE_SIZE, TAG_SIZE};
use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};

pub use abi::encode_send;
pub use payload::PlaintextRequest;

/// Inputs for envelope assembly, produced by earlier pipeline steps
pub struct EnvelopeParts<'a> {
    /// Declared sender public key, uncompressed SEC1 (65 bytes)
    pub sender_public_key: &'a [u8],
    /// Nonce the payload was sealed with (12 bytes)
    pub nonce: &'a [u8],
    /// Sealed payload: ciphertext with the tag appended
    pub ciphertext: &'a [u8],
    /// 65-byte signature from the wallet over the signing hash
    pub signature: &'a [u8],
    /// Gas limit granted to the result callback
    pub callback_gas_limit: u64,
}

/// The assembled unit handed to the router contract
///
/// Hex fields are 0x-prefixed. `user_key` is the ephemeral session key the
/// gateway runs ECDH against; `user_pubkey` is the wallet key recovered
/// from the payload signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayEnvelope {
    pub user_key: String,
    pub user_pubkey: String,
    pub routing_code_hash: String,
    pub task_destination_network: String,
    pub handle: String,
    pub nonce: String,
    pub payload: String,
    pub payload_signature: String,
    pub callback_gas_limit: u64,
}

/// Assemble a relay envelope, enforcing all cross-field invariants
///
/// Recovers the signer from the signature over `signing_hash(ciphertext)`
/// and requires it to equal the declared sender public key: a provider
/// signing under the wrong account aborts the submission here.
///
/// # Errors
///
/// * `RelayError::SignerMismatch` if the recovered key differs from the
///   declared sender key
/// * `RelayError::InvalidNonce` for a nonce of the wrong length
/// * `RelayError::IncompleteEnvelope` for missing or malformed fields
pub fn assemble(
    config: &GatewayConfig,
    session_public_key: &[u8],
    handle: &str,
    parts: &EnvelopeParts<'_>,
) -> Result<RelayEnvelope> {
    if parts.nonce.len() != NONCE_SIZE {
        return Err(RelayError::InvalidNonce {
            expected: NONCE_SIZE,
            actual: parts.nonce.len(),
        });
    }
    if parts.ciphertext.len() <= TAG_SIZE {
        return Err(RelayError::IncompleteEnvelope {
            field: "payload".to_string(),
            reason: "sealed payload is empty".to_string(),
        });
    }
    if parts.signature.len() != 65 {
        return Err(RelayError::IncompleteEnvelope {
            field: "payload_signature".to_string(),
            reason: format!("expected 65 bytes, got {}", parts.signature.len()),
        });
    }
    if handle.is_empty() {
        return Err(RelayError::IncompleteEnvelope {
            field: "handle".to_string(),
            reason: "operation handle is empty".to_string(),
        });
    }
    if parts.callback_gas_limit == 0 || parts.callback_gas_limit > config.callback_gas_ceiling {
        return Err(RelayError::IncompleteEnvelope {
            field: "callback_gas_limit".to_string(),
            reason: format!(
                "must be in 1..={}, got {}",
                config.callback_gas_ceiling, parts.callback_gas_limit
            ),
        });
    }

    // Self-check: the signature must bind this exact ciphertext to the
    // declared sender identity
    let payload_hash = signing_hash(parts.ciphertext);
    let recovered = recover_signer(&payload_hash, parts.signature)?;
    if recovered != parts.sender_public_key {
        return Err(RelayError::SignerMismatch {
            declared: format!("0x{}", hex::encode(parts.sender_public_key)),
            recovered: format!("0x{}", hex::encode(&recovered)),
        });
    }

    Ok(RelayEnvelope {
        user_key: format!("0x{}", hex::encode(session_public_key)),
        user_pubkey: format!("0x{}", hex::encode(&recovered)),
        routing_code_hash: hex::encode(config.routing_code_hash),
        task_destination_network: config.destination_network.clone(),
        handle: handle.to_string(),
        nonce: format!("0x{}", hex::encode(parts.nonce)),
        payload: format!("0x{}", hex::encode(parts.ciphertext)),
        payload_signature: format!("0x{}", hex::encode(parts.signature)),
        callback_gas_limit: parts.callback_gas_limit,
    })
}
