// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay Error Types
//!
//! Single error taxonomy for the confidential relay pipeline. Every error is
//! terminal for the current submission attempt: nothing is retried inside the
//! core, and no partially-sealed or partially-signed data ever reaches the
//! router contract. The caller decides whether to restart the pipeline with
//! fresh key and nonce material.

use thiserror::Error;

/// Errors raised by the confidential relay envelope pipeline
#[derive(Debug, Error)]
pub enum RelayError {
    /// ECDH key agreement failed (malformed scalar, malformed or degenerate
    /// public key point)
    #[error("Key agreement failed ({key_type}): {reason}")]
    KeyAgreement {
        /// Which key failed (e.g. "ephemeral_private_key", "gateway_public_key")
        key_type: String,
        /// Specific failure reason
        reason: String,
    },

    /// Nonce size validation failed (ChaCha20-Poly1305 requires 12 bytes)
    #[error("Invalid nonce size: expected {expected} bytes, got {actual} bytes")]
    InvalidNonce { expected: usize, actual: usize },

    /// AEAD authentication tag verification failed. Always fail-closed: no
    /// partial plaintext is returned.
    #[error("Authentication failed during {operation}: {reason}")]
    Authentication { operation: String, reason: String },

    /// ECDSA signature recovery failed (wrong size, bad recovery id,
    /// malformed signature)
    #[error("Signature recovery failed: {reason}")]
    SignerRecovery { reason: String },

    /// Recovered signer public key does not match the declared sender key
    #[error("Signer mismatch: declared {declared}, recovered {recovered}")]
    SignerMismatch { declared: String, recovered: String },

    /// Envelope field missing, empty, or malformed
    #[error("Incomplete envelope: field '{field}': {reason}")]
    IncompleteEnvelope { field: String, reason: String },

    /// Active chain id has no configured router contract
    #[error("Unsupported chain id: {chain_id}")]
    UnsupportedChain { chain_id: String },

    /// Fee value computation overflowed
    #[error("Fee computation overflow: gas_price={gas_price}, callback_gas_limit={callback_gas_limit}")]
    FeeOverflow {
        gas_price: String,
        callback_gas_limit: u64,
    },

    /// Failure surfaced by an external collaborator (RPC failure, user
    /// rejected the signing request, broadcast failure)
    #[error("Provider error during {operation}: {reason}")]
    Provider { operation: String, reason: String },
}

impl From<hex::FromHexError> for RelayError {
    fn from(err: hex::FromHexError) -> Self {
        RelayError::IncompleteEnvelope {
            field: "hex_field".to_string(),
            reason: format!("hex decode error: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
