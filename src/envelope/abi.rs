// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Router Call Encoding
//!
//! ABI-encodes the router contract's `send` call:
//!
//! ```text
//! send(bytes32 payloadHash, address userAddress, address routingInfo,
//!      (bytes,bytes,bytes32,string,string,bytes,bytes,bytes,uint256) info)
//! ```
//!
//! The router ABI is a single fixed function, so the `Function` value is
//! built directly rather than generated with `abigen!`.

use super::RelayEnvelope;
use crate::error::{RelayError, Result};
use ethers::abi::{Function, Param, ParamType, StateMutability, Token};
use ethers::types::{Address, Bytes, U256};

/// The router's `send` function descriptor
#[allow(deprecated)] // `constant` is required by the ethers Function struct
fn send_function() -> Function {
    let info_tuple = ParamType::Tuple(vec![
        ParamType::Bytes,          // user_key
        ParamType::Bytes,          // user_pubkey
        ParamType::FixedBytes(32), // routing_code_hash
        ParamType::String,         // task_destination_network
        ParamType::String,         // handle
        ParamType::Bytes,          // nonce
        ParamType::Bytes,          // payload
        ParamType::Bytes,          // payload_signature
        ParamType::Uint(256),      // callback_gas_limit
    ]);

    Function {
        name: "send".to_string(),
        inputs: vec![
            param("payloadHash", ParamType::FixedBytes(32)),
            param("userAddress", ParamType::Address),
            param("routingInfo", ParamType::Address),
            param("info", info_tuple),
        ],
        outputs: vec![],
        constant: None,
        state_mutability: StateMutability::Payable,
    }
}

fn param(name: &str, kind: ParamType) -> Param {
    Param {
        name: name.to_string(),
        kind,
        internal_type: None,
    }
}

/// Encode the calldata for the router `send` call
///
/// Deterministic: identical inputs produce identical calldata.
///
/// # Errors
///
/// `RelayError::IncompleteEnvelope` if an envelope hex field fails to
/// decode or the routing code hash is not 32 bytes.
pub fn encode_send(
    payload_hash: [u8; 32],
    user_address: Address,
    routing_contract: Address,
    envelope: &RelayEnvelope,
) -> Result<Bytes> {
    let routing_code_hash = decode_hex_field("routing_code_hash", &envelope.routing_code_hash)?;
    if routing_code_hash.len() != 32 {
        return Err(RelayError::IncompleteEnvelope {
            field: "routing_code_hash".to_string(),
            reason: format!("expected 32 bytes, got {}", routing_code_hash.len()),
        });
    }

    let info = Token::Tuple(vec![
        Token::Bytes(decode_hex_field("user_key", &envelope.user_key)?),
        Token::Bytes(decode_hex_field("user_pubkey", &envelope.user_pubkey)?),
        Token::FixedBytes(routing_code_hash),
        Token::String(envelope.task_destination_network.clone()),
        Token::String(envelope.handle.clone()),
        Token::Bytes(decode_hex_field("nonce", &envelope.nonce)?),
        Token::Bytes(decode_hex_field("payload", &envelope.payload)?),
        Token::Bytes(decode_hex_field(
            "payload_signature",
            &envelope.payload_signature,
        )?),
        Token::Uint(U256::from(envelope.callback_gas_limit)),
    ]);

    let calldata = send_function()
        .encode_input(&[
            Token::FixedBytes(payload_hash.to_vec()),
            Token::Address(user_address),
            Token::Address(routing_contract),
            info,
        ])
        .map_err(|e| RelayError::IncompleteEnvelope {
            field: "calldata".to_string(),
            reason: format!("ABI encoding failed: {}", e),
        })?;

    Ok(Bytes::from(calldata))
}

fn decode_hex_field(field: &str, value: &str) -> Result<Vec<u8>> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(stripped).map_err(|e| RelayError::IncompleteEnvelope {
        field: field.to_string(),
        reason: format!("hex decode error: {}", e),
    })
}
