//! Fee computation and transaction shaping tests

use ethers::types::{Address, Bytes, U256};
use fabstir_relay_client::{build_transaction, compute_value, RelayError};

#[test]
fn test_reference_value() {
    // floor(100 * 300000 * 3 / 2) = 45,000,000
    let value = compute_value(U256::from(100u64), 300_000, 3, 2).unwrap();
    assert_eq!(value, U256::from(45_000_000u64));
}

#[test]
fn test_margin_is_a_parameter() {
    let gas_price = U256::from(100u64);
    assert_eq!(
        compute_value(gas_price, 300_000, 1, 1).unwrap(),
        U256::from(30_000_000u64)
    );
    assert_eq!(
        compute_value(gas_price, 300_000, 2, 1).unwrap(),
        U256::from(60_000_000u64)
    );
}

#[test]
fn test_value_rounds_down() {
    // 7 * 3 * 3 / 2 = 31.5 -> 31
    let value = compute_value(U256::from(7u64), 3, 3, 2).unwrap();
    assert_eq!(value, U256::from(31u64));
}

#[test]
fn test_overflow_is_reported_not_wrapped() {
    let result = compute_value(U256::MAX, 300_000, 3, 2);
    assert!(matches!(result, Err(RelayError::FeeOverflow { .. })));

    let result = compute_value(U256::MAX / 2, 3, 3, 2);
    assert!(matches!(result, Err(RelayError::FeeOverflow { .. })));
}

#[test]
fn test_zero_gas_price_yields_zero_value() {
    let value = compute_value(U256::zero(), 300_000, 3, 2).unwrap();
    assert_eq!(value, U256::zero());
}

#[test]
fn test_build_transaction_fields() {
    let router = Address::random();
    let from = Address::random();
    let calldata = Bytes::from(vec![0xDE, 0xAD, 0xBE, 0xEF]);

    let tx = build_transaction(router, from, U256::from(45_000_000u64), 150_000, calldata.clone());

    assert_eq!(tx.to, Some(router.into()));
    assert_eq!(tx.from, Some(from));
    assert_eq!(tx.value, Some(U256::from(45_000_000u64)));
    assert_eq!(tx.gas, Some(U256::from(150_000u64)));
    assert_eq!(tx.data, Some(calldata));
}
