//! Chain routing table tests

use ethers::types::Address;
use fabstir_relay_client::{ChainRegistry, RelayError};
use std::str::FromStr;

#[test]
fn test_sepolia_router_address() {
    let registry = ChainRegistry::new();
    let router = registry.router_for("11155111").unwrap();
    assert_eq!(
        router,
        Address::from_str("0x3879E146140b627a5C858a08e507B171D9E43139").unwrap()
    );
}

#[test]
fn test_scroll_sepolia_router_address() {
    let registry = ChainRegistry::new();
    let router = registry.router_for("534351").unwrap();
    assert_eq!(
        router,
        Address::from_str("0x4c14a6A0CD2DA2848D3C31285B828F6364087735").unwrap()
    );
}

#[test]
fn test_unknown_chains_are_rejected() {
    let registry = ChainRegistry::new();

    for chain_id in ["1", "84532", "0", "", "eip155:11155111"] {
        let result = registry.router_for(chain_id);
        assert!(
            matches!(
                result,
                Err(RelayError::UnsupportedChain { chain_id: ref id }) if id == chain_id
            ),
            "chain id {:?} must not resolve to a router",
            chain_id
        );
    }
}

#[test]
fn test_supported_chain_listing() {
    let registry = ChainRegistry::new();
    assert!(registry.is_chain_supported("11155111"));
    assert!(registry.is_chain_supported("534351"));
    assert!(!registry.is_chain_supported("1"));

    let mut chains = registry.list_supported_chains();
    chains.sort();
    assert_eq!(chains, vec!["11155111".to_string(), "534351".to_string()]);
}

#[test]
fn test_profiles_carry_names() {
    let registry = ChainRegistry::new();
    assert_eq!(registry.get_chain("11155111").unwrap().name, "Sepolia");
    assert_eq!(registry.get_chain("534351").unwrap().name, "Scroll Sepolia");
}
