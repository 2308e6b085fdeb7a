//! Envelope assembly tests
//!
//! Assembly must be all-or-nothing: every cross-field invariant failure
//! aborts before an envelope exists.

use ethers::signers::{LocalWallet, Signer};
use fabstir_relay_client::{assemble, keccak256, EnvelopeParts, GatewayConfig, RelayError};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;

struct Fixture {
    config: GatewayConfig,
    wallet: LocalWallet,
    wallet_pub: Vec<u8>,
    ciphertext: Vec<u8>,
    signature: Vec<u8>,
}

async fn fixture() -> Fixture {
    let config = GatewayConfig::from_env().unwrap();
    let wallet: LocalWallet = LocalWallet::new(&mut OsRng);
    let wallet_pub = wallet
        .signer()
        .verifying_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec();

    let ciphertext = vec![0x5A; 64];
    let signature = wallet
        .sign_message(keccak256(&ciphertext))
        .await
        .unwrap()
        .to_vec();

    Fixture {
        config,
        wallet,
        wallet_pub,
        ciphertext,
        signature,
    }
}

#[tokio::test]
async fn test_assemble_success() {
    let f = fixture().await;
    let nonce = [3u8; 12];

    let envelope = assemble(
        &f.config,
        &[0x02; 33],
        "create_auction_item",
        &EnvelopeParts {
            sender_public_key: &f.wallet_pub,
            nonce: &nonce,
            ciphertext: &f.ciphertext,
            signature: &f.signature,
            callback_gas_limit: 300_000,
        },
    )
    .unwrap();

    assert_eq!(envelope.user_key, format!("0x{}", hex::encode([0x02u8; 33])));
    assert_eq!(envelope.user_pubkey, format!("0x{}", hex::encode(&f.wallet_pub)));
    assert_eq!(envelope.nonce, format!("0x{}", hex::encode(nonce)));
    assert_eq!(envelope.payload, format!("0x{}", hex::encode(&f.ciphertext)));
    assert_eq!(envelope.handle, "create_auction_item");
    assert_eq!(envelope.task_destination_network, "pulsar-3");
    assert_eq!(envelope.callback_gas_limit, 300_000);
}

#[tokio::test]
async fn test_signature_under_wrong_account_aborts() {
    let f = fixture().await;

    // A different wallet signs the same hash; recovery will not match the
    // declared sender key
    let other: LocalWallet = LocalWallet::new(&mut OsRng);
    let wrong_signature = other
        .sign_message(keccak256(&f.ciphertext))
        .await
        .unwrap()
        .to_vec();

    let result = assemble(
        &f.config,
        &[0x02; 33],
        "create_auction_item",
        &EnvelopeParts {
            sender_public_key: &f.wallet_pub,
            nonce: &[0u8; 12],
            ciphertext: &f.ciphertext,
            signature: &wrong_signature,
            callback_gas_limit: 300_000,
        },
    );
    assert!(matches!(result, Err(RelayError::SignerMismatch { .. })));
}

#[tokio::test]
async fn test_signature_over_different_ciphertext_aborts() {
    let f = fixture().await;

    // Valid wallet, but the signature binds a different ciphertext
    let stale_signature = f
        .wallet
        .sign_message(keccak256(b"previous attempt ciphertext"))
        .await
        .unwrap()
        .to_vec();

    let result = assemble(
        &f.config,
        &[0x02; 33],
        "create_auction_item",
        &EnvelopeParts {
            sender_public_key: &f.wallet_pub,
            nonce: &[0u8; 12],
            ciphertext: &f.ciphertext,
            signature: &stale_signature,
            callback_gas_limit: 300_000,
        },
    );
    assert!(matches!(result, Err(RelayError::SignerMismatch { .. })));
}

#[tokio::test]
async fn test_rejects_bad_nonce_length() {
    let f = fixture().await;
    let result = assemble(
        &f.config,
        &[0x02; 33],
        "create_auction_item",
        &EnvelopeParts {
            sender_public_key: &f.wallet_pub,
            nonce: &[0u8; 16],
            ciphertext: &f.ciphertext,
            signature: &f.signature,
            callback_gas_limit: 300_000,
        },
    );
    assert!(matches!(
        result,
        Err(RelayError::InvalidNonce {
            expected: 12,
            actual: 16
        })
    ));
}

#[tokio::test]
async fn test_rejects_missing_fields() {
    let f = fixture().await;

    // Empty handle
    let result = assemble(
        &f.config,
        &[0x02; 33],
        "",
        &EnvelopeParts {
            sender_public_key: &f.wallet_pub,
            nonce: &[0u8; 12],
            ciphertext: &f.ciphertext,
            signature: &f.signature,
            callback_gas_limit: 300_000,
        },
    );
    assert!(matches!(
        result,
        Err(RelayError::IncompleteEnvelope { field, .. }) if field == "handle"
    ));

    // Empty sealed payload
    let result = assemble(
        &f.config,
        &[0x02; 33],
        "create_auction_item",
        &EnvelopeParts {
            sender_public_key: &f.wallet_pub,
            nonce: &[0u8; 12],
            ciphertext: &[],
            signature: &f.signature,
            callback_gas_limit: 300_000,
        },
    );
    assert!(matches!(
        result,
        Err(RelayError::IncompleteEnvelope { field, .. }) if field == "payload"
    ));

    // Truncated signature
    let result = assemble(
        &f.config,
        &[0x02; 33],
        "create_auction_item",
        &EnvelopeParts {
            sender_public_key: &f.wallet_pub,
            nonce: &[0u8; 12],
            ciphertext: &f.ciphertext,
            signature: &f.signature[..64],
            callback_gas_limit: 300_000,
        },
    );
    assert!(matches!(
        result,
        Err(RelayError::IncompleteEnvelope { field, .. }) if field == "payload_signature"
    ));
}

#[tokio::test]
async fn test_rejects_out_of_range_callback_gas() {
    let f = fixture().await;

    for bad_limit in [0u64, f.config.callback_gas_ceiling + 1] {
        let result = assemble(
            &f.config,
            &[0x02; 33],
            "create_auction_item",
            &EnvelopeParts {
                sender_public_key: &f.wallet_pub,
                nonce: &[0u8; 12],
                ciphertext: &f.ciphertext,
                signature: &f.signature,
                callback_gas_limit: bad_limit,
            },
        );
        assert!(
            matches!(
                result,
                Err(RelayError::IncompleteEnvelope { ref field, .. }) if field == "callback_gas_limit"
            ),
            "callback gas limit {} must be rejected",
            bad_limit
        );
    }
}
