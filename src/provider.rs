// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! External Collaborator Boundary
//!
//! The pipeline never talks to a wallet or RPC endpoint directly; it goes
//! through these traits. `WalletProvider` covers account discovery,
//! personal-sign, gas pricing, and broadcast. `ChainMonitor` reports the
//! active chain id and notifies on change. Any collaborator failure
//! surfaces as `RelayError::Provider` and is terminal for the current
//! submission attempt.

use crate::error::{RelayError, Result};
use async_trait::async_trait;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, TransactionRequest, H256, U256};
use tokio::sync::watch;

/// Wallet/account provider boundary
///
/// `personal_sign` receives the bare 32-byte message hash; the wallet is
/// expected to apply the EIP-191 prefix itself, exactly like a browser
/// wallet's `personal_sign` RPC.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts the provider can sign with (0x hex addresses)
    async fn request_accounts(&self) -> Result<Vec<String>>;

    /// EIP-191 personal-sign over a 32-byte hash; returns the 65-byte
    /// compact signature (r + s + v)
    async fn personal_sign(&self, address: &str, message_hash: [u8; 32]) -> Result<Vec<u8>>;

    /// Current gas price in wei
    async fn gas_price(&self) -> Result<U256>;

    /// Sign and broadcast a transaction, returning its hash
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<H256>;
}

/// Chain/network monitor boundary
#[async_trait]
pub trait ChainMonitor: Send + Sync {
    /// Active chain id as a decimal string
    async fn chain_id(&self) -> Result<String>;

    /// Notification channel delivering the chain id on change
    fn subscribe(&self) -> watch::Receiver<String>;
}

/// In-process wallet provider backed by an ethers `LocalWallet`
///
/// Used by the test suite and by tooling that holds its own key. Signing
/// is deterministic per ECDSA-with-RFC6979, which keeps end-to-end tests
/// reproducible.
pub struct LocalWalletProvider {
    wallet: LocalWallet,
    gas_price: U256,
}

impl LocalWalletProvider {
    pub fn new(wallet: LocalWallet, gas_price: U256) -> Self {
        Self { wallet, gas_price }
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Uncompressed SEC1 public key (65 bytes) of the backing wallet.
    /// The declared sender identity the envelope self-check runs against.
    pub fn public_key(&self) -> Vec<u8> {
        self.wallet
            .signer()
            .verifying_key()
            .to_encoded_point(false)
            .as_bytes()
            .to_vec()
    }
}

#[async_trait]
impl WalletProvider for LocalWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<String>> {
        Ok(vec![format!("{:#x}", self.wallet.address())])
    }

    async fn personal_sign(&self, address: &str, message_hash: [u8; 32]) -> Result<Vec<u8>> {
        let expected = format!("{:#x}", self.wallet.address());
        if !address.eq_ignore_ascii_case(&expected) {
            return Err(RelayError::Provider {
                operation: "personal_sign".to_string(),
                reason: format!("unknown account {}", address),
            });
        }

        // sign_message applies the EIP-191 prefix over the 32 raw bytes,
        // matching a browser wallet handed a hash through personal_sign
        let signature = self
            .wallet
            .sign_message(message_hash)
            .await
            .map_err(|e| RelayError::Provider {
                operation: "personal_sign".to_string(),
                reason: format!("signing failed: {}", e),
            })?;

        Ok(signature.to_vec())
    }

    async fn gas_price(&self) -> Result<U256> {
        Ok(self.gas_price)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<H256> {
        // No chain behind this provider; hash the request so callers get a
        // stable receipt
        let encoded = serde_json::to_vec(&tx).map_err(|e| RelayError::Provider {
            operation: "send_transaction".to_string(),
            reason: format!("failed to encode transaction: {}", e),
        })?;
        Ok(H256::from(crate::crypto::keccak256(&encoded)))
    }
}

/// Chain monitor with an externally settable chain id
///
/// Backs tests and single-chain deployments; a production monitor wraps
/// the provider's chain-changed notifications instead.
pub struct StaticChainMonitor {
    sender: watch::Sender<String>,
    receiver: watch::Receiver<String>,
}

impl StaticChainMonitor {
    pub fn new(chain_id: impl Into<String>) -> Self {
        let (sender, receiver) = watch::channel(chain_id.into());
        Self { sender, receiver }
    }

    /// Simulate a network switch. Decimal string ids; hex ids from
    /// EIP-695-style notifications must be normalized before this call.
    pub fn set_chain_id(&self, chain_id: impl Into<String>) {
        // Receiver half is held by self, send cannot fail
        let _ = self.sender.send(chain_id.into());
    }
}

#[async_trait]
impl ChainMonitor for StaticChainMonitor {
    async fn chain_id(&self) -> Result<String> {
        Ok(self.receiver.borrow().clone())
    }

    fn subscribe(&self) -> watch::Receiver<String> {
        self.receiver.clone()
    }
}
