// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gateway Protocol Configuration
//!
//! Static, out-of-band-configured constants for the confidential relay
//! protocol: the gateway's ingress public key, the routing contract on the
//! destination network, callback wiring, and the fee margin. Values can be
//! overridden through environment variables; defaults match the deployed
//! gateway.

use crate::crypto::keccak256;
use crate::error::{RelayError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ethers::types::Address;
use std::env;
use std::str::FromStr;

/// Base64 compressed secp256k1 public key of the gateway ingress point
pub const GATEWAY_PUBLIC_KEY_B64: &str = "A20KrD7xDmkFXpNMqJn1CLpRaDLcdKpO1NdBBS7VpWh3";

/// Destination network identifier the gateway forwards to
pub const DESTINATION_NETWORK: &str = "pulsar-3";

/// Default gas limit granted to the result callback
pub const DEFAULT_CALLBACK_GAS_LIMIT: u64 = 300_000;

/// Ceiling on caller-supplied callback gas limits. Protects the router
/// contract from unbounded gas griefing.
pub const CALLBACK_GAS_CEILING: u64 = 2_000_000;

/// Fixed gas limit for the router `send` transaction itself
pub const TX_GAS_LIMIT: u64 = 150_000;

/// Fee margin applied to gasPrice * callbackGasLimit: numerator/denominator
pub const FEE_MARGIN: (u64, u64) = (3, 2);

/// First four bytes of the keccak hash of a function signature
///
/// The ABI selector of the callback entry point, e.g.
/// `function_selector("upgradeHandler()")`.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Static protocol configuration for one gateway deployment
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Gateway ingress public key (compressed SEC1, 33 bytes)
    pub gateway_public_key: Vec<u8>,
    /// Confidential contract the gateway routes the payload to
    pub routing_contract: Address,
    /// Code hash of the routing contract (32 bytes)
    pub routing_code_hash: [u8; 32],
    /// Operation handle invoked on the routing contract
    pub handle: String,
    /// Destination network identifier
    pub destination_network: String,
    /// ABI selector of the callback entry point
    pub callback_selector: [u8; 4],
    /// Gas limit granted to the callback
    pub callback_gas_limit: u64,
    /// Maximum accepted callback gas limit
    pub callback_gas_ceiling: u64,
    /// Gas limit for the submission transaction
    pub tx_gas_limit: u64,
    /// Fee margin numerator/denominator
    pub fee_margin: (u64, u64),
}

impl GatewayConfig {
    /// Build a config from environment variables, falling back to the
    /// deployed gateway's defaults
    ///
    /// Recognized variables: `GATEWAY_PUBLIC_KEY` (base64),
    /// `SECRET_ROUTING_CONTRACT` (hex address), `SECRET_ROUTING_CODE_HASH`
    /// (64 hex chars), `RELAY_HANDLE`, `CALLBACK_GAS_LIMIT`.
    ///
    /// # Errors
    ///
    /// `RelayError::IncompleteEnvelope` if an override is present but
    /// malformed; a bad value must not silently fall back to a default.
    pub fn from_env() -> Result<Self> {
        let gateway_b64 =
            env::var("GATEWAY_PUBLIC_KEY").unwrap_or_else(|_| GATEWAY_PUBLIC_KEY_B64.to_string());
        let gateway_public_key = decode_gateway_key(&gateway_b64)?;

        let routing_contract = match env::var("SECRET_ROUTING_CONTRACT") {
            Ok(addr) => {
                Address::from_str(&addr).map_err(|e| RelayError::IncompleteEnvelope {
                    field: "routing_contract".to_string(),
                    reason: format!("invalid address: {}", e),
                })?
            }
            Err(_) => Address::zero(),
        };

        let routing_code_hash = match env::var("SECRET_ROUTING_CODE_HASH") {
            Ok(hash) => decode_code_hash(&hash)?,
            Err(_) => [0u8; 32],
        };

        let callback_gas_limit = env::var("CALLBACK_GAS_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CALLBACK_GAS_LIMIT);

        Ok(GatewayConfig {
            gateway_public_key,
            routing_contract,
            routing_code_hash,
            handle: env::var("RELAY_HANDLE")
                .unwrap_or_else(|_| "create_auction_item".to_string()),
            destination_network: DESTINATION_NETWORK.to_string(),
            callback_selector: function_selector("upgradeHandler()"),
            callback_gas_limit,
            callback_gas_ceiling: CALLBACK_GAS_CEILING,
            tx_gas_limit: TX_GAS_LIMIT,
            fee_margin: FEE_MARGIN,
        })
    }
}

/// Decode and validate the base64 gateway public key
pub fn decode_gateway_key(encoded: &str) -> Result<Vec<u8>> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| RelayError::KeyAgreement {
            key_type: "gateway_public_key".to_string(),
            reason: format!("invalid base64: {}", e),
        })?;
    if bytes.len() != 33 && bytes.len() != 65 {
        return Err(RelayError::KeyAgreement {
            key_type: "gateway_public_key".to_string(),
            reason: format!("expected 33 or 65 bytes, got {}", bytes.len()),
        });
    }
    Ok(bytes)
}

fn decode_code_hash(encoded: &str) -> Result<[u8; 32]> {
    let stripped = encoded.strip_prefix("0x").unwrap_or(encoded);
    let bytes = hex::decode(stripped)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| RelayError::IncompleteEnvelope {
            field: "routing_code_hash".to_string(),
            reason: format!("expected 32 bytes, got {}", bytes.len()),
        })
}
