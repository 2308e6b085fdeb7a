// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Plaintext Relay Payload
//!
//! The JSON document sealed for the destination network. Field order is
//! part of the wire format: serde_json serializes struct fields in
//! declaration order, which keeps the serialization deterministic and the
//! ciphertext reproducible for a fixed key and nonce.

use crate::config::GatewayConfig;
use crate::error::{RelayError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ethers::types::Address;
use serde::{Deserialize, Serialize};

/// Plaintext request sealed into the relay envelope
///
/// Only the destination network can read this after sealing. The gateway
/// contract sees ciphertext. Field order must not be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaintextRequest {
    /// Application fields as a JSON-encoded string
    pub data: String,
    /// Destination contract address on the confidential network
    pub routing_info: String,
    /// Code hash of the destination contract (hex, no prefix)
    pub routing_code_hash: String,
    /// Caller's public chain address (0x hex)
    pub user_address: String,
    /// Caller's session public key, base64 compressed SEC1 (not the wallet key)
    pub user_key: String,
    /// Callback contract address bytes, base64
    pub callback_address: String,
    /// 4-byte callback function selector, base64
    pub callback_selector: String,
    /// Gas limit granted to the callback
    pub callback_gas_limit: u64,
}

impl PlaintextRequest {
    /// Build a validated plaintext request
    ///
    /// # Arguments
    ///
    /// * `config` - Gateway protocol configuration
    /// * `data` - JSON-encoded application payload (e.g. the auction item fields)
    /// * `user_address` - Caller's public chain address
    /// * `session_public_key` - Compressed ephemeral session public key (33 bytes)
    /// * `callback_address` - Contract the router invokes with the result
    /// * `callback_gas_limit` - Gas granted to that callback
    ///
    /// # Errors
    ///
    /// `RelayError::IncompleteEnvelope` if a required field is empty, the
    /// routing contract is unset, or the callback gas limit is zero or
    /// exceeds the configured ceiling.
    pub fn build(
        config: &GatewayConfig,
        data: &str,
        user_address: Address,
        session_public_key: &[u8],
        callback_address: Address,
        callback_gas_limit: u64,
    ) -> Result<Self> {
        if data.is_empty() {
            return Err(RelayError::IncompleteEnvelope {
                field: "data".to_string(),
                reason: "application payload is empty".to_string(),
            });
        }
        if config.routing_contract == Address::zero() {
            return Err(RelayError::IncompleteEnvelope {
                field: "routing_info".to_string(),
                reason: "routing contract is not configured".to_string(),
            });
        }
        if callback_address == Address::zero() {
            return Err(RelayError::IncompleteEnvelope {
                field: "callback_address".to_string(),
                reason: "callback address is not configured".to_string(),
            });
        }
        if callback_gas_limit == 0 || callback_gas_limit > config.callback_gas_ceiling {
            return Err(RelayError::IncompleteEnvelope {
                field: "callback_gas_limit".to_string(),
                reason: format!(
                    "must be in 1..={}, got {}",
                    config.callback_gas_ceiling, callback_gas_limit
                ),
            });
        }

        Ok(PlaintextRequest {
            data: data.to_string(),
            routing_info: format!("{:#x}", config.routing_contract),
            routing_code_hash: hex::encode(config.routing_code_hash),
            user_address: format!("{:#x}", user_address),
            user_key: BASE64.encode(session_public_key),
            callback_address: BASE64.encode(callback_address.as_bytes()),
            callback_selector: BASE64.encode(config.callback_selector),
            callback_gas_limit,
        })
    }

    /// Deterministic serialization for sealing
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| RelayError::IncompleteEnvelope {
            field: "payload".to_string(),
            reason: format!("serialization failed: {}", e),
        })
    }
}
