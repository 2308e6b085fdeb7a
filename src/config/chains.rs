// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chain Routing Table
//!
//! Maps the active chain id to the router/callback contract deployed on
//! that chain. Chain ids are decimal strings because that is the form the
//! chain monitor reports. Lookup is data-driven: an unrecognized id is a
//! hard `UnsupportedChain` error, never a default address.

use crate::error::{RelayError, Result};
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Chain id of Ethereum Sepolia
pub const SEPOLIA_CHAIN_ID: &str = "11155111";

/// Chain id of Scroll Sepolia
pub const SCROLL_SEPOLIA_CHAIN_ID: &str = "534351";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainProfile {
    pub chain_id: String,
    pub name: String,
    /// Router/callback contract receiving the relay envelope on this chain
    pub router: Address,
}

impl ChainProfile {
    pub fn sepolia() -> Self {
        ChainProfile {
            chain_id: SEPOLIA_CHAIN_ID.to_string(),
            name: "Sepolia".to_string(),
            router: router_from_env(
                "SEPOLIA_ROUTER_ADDRESS",
                "0x3879E146140b627a5C858a08e507B171D9E43139",
            ),
        }
    }

    pub fn scroll_sepolia() -> Self {
        ChainProfile {
            chain_id: SCROLL_SEPOLIA_CHAIN_ID.to_string(),
            name: "Scroll Sepolia".to_string(),
            router: router_from_env(
                "SCROLL_SEPOLIA_ROUTER_ADDRESS",
                "0x4c14a6A0CD2DA2848D3C31285B828F6364087735",
            ),
        }
    }
}

fn router_from_env(var: &str, default: &str) -> Address {
    std::env::var(var)
        .ok()
        .and_then(|addr| Address::from_str(&addr).ok())
        .unwrap_or_else(|| Address::from_str(default).expect("Invalid built-in router address"))
}

/// Registry of chains the relay client can submit through
pub struct ChainRegistry {
    chains: HashMap<String, ChainProfile>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        let mut chains = HashMap::new();
        for profile in [ChainProfile::sepolia(), ChainProfile::scroll_sepolia()] {
            chains.insert(profile.chain_id.clone(), profile);
        }
        ChainRegistry { chains }
    }

    pub fn get_chain(&self, chain_id: &str) -> Option<&ChainProfile> {
        self.chains.get(chain_id)
    }

    /// Router contract for the given chain id
    ///
    /// # Errors
    ///
    /// `RelayError::UnsupportedChain` for any id without a configured
    /// router; submission must block rather than fall back.
    pub fn router_for(&self, chain_id: &str) -> Result<Address> {
        self.chains
            .get(chain_id)
            .map(|profile| profile.router)
            .ok_or_else(|| RelayError::UnsupportedChain {
                chain_id: chain_id.to_string(),
            })
    }

    pub fn is_chain_supported(&self, chain_id: &str) -> bool {
        self.chains.contains_key(chain_id)
    }

    pub fn list_supported_chains(&self) -> Vec<String> {
        self.chains.keys().cloned().collect()
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::new()
    }
}
