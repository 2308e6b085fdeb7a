// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Static configuration: chain routing table and gateway protocol constants

pub mod chains;
pub mod gateway;

pub use chains::{ChainProfile, ChainRegistry, SCROLL_SEPOLIA_CHAIN_ID, SEPOLIA_CHAIN_ID};
pub use gateway::{
    function_selector, GatewayConfig, CALLBACK_GAS_CEILING, DEFAULT_CALLBACK_GAS_LIMIT,
    DESTINATION_NETWORK, FEE_MARGIN, GATEWAY_PUBLIC_KEY_B64, TX_GAS_LIMIT,
};
