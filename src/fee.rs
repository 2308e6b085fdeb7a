// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fee Computation and Transaction Shaping
//!
//! Computes the value attached to the router transaction (covering the
//! callback's execution cost with a safety margin) and shapes the final
//! `TransactionRequest` for the external wallet/provider. No network I/O
//! happens here.

use crate::error::{RelayError, Result};
use ethers::types::{Address, Bytes, TransactionRequest, U256};

/// Compute the transaction value from gas price and callback gas limit
///
/// `value = floor(gas_price * callback_gas_limit * margin_num / margin_den)`.
/// The margin (3/2 for the deployed gateway) covers callback execution cost
/// uncertainty and is a parameter so it can be tuned and tested
/// independently.
///
/// # Errors
///
/// `RelayError::FeeOverflow` if the multiplication overflows a U256;
/// wrapping would silently underpay the router.
pub fn compute_value(
    gas_price: U256,
    callback_gas_limit: u64,
    margin_numerator: u64,
    margin_denominator: u64,
) -> Result<U256> {
    let overflow = || RelayError::FeeOverflow {
        gas_price: gas_price.to_string(),
        callback_gas_limit,
    };

    let value = gas_price
        .checked_mul(U256::from(callback_gas_limit))
        .ok_or_else(overflow)?
        .checked_mul(U256::from(margin_numerator))
        .ok_or_else(overflow)?;

    // Integer division floors
    Ok(value / U256::from(margin_denominator))
}

/// Shape the router submission transaction
///
/// Pure: returns a fully formed request for the external provider to sign
/// and broadcast.
pub fn build_transaction(
    router: Address,
    from: Address,
    value: U256,
    gas_limit: u64,
    calldata: Bytes,
) -> TransactionRequest {
    TransactionRequest::new()
        .to(router)
        .from(from)
        .value(value)
        .gas(gas_limit)
        .data(calldata)
}
