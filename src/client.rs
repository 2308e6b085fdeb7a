// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay Submission Pipeline
//!
//! Orchestrates one confidential submission end to end: resolve the active
//! chain, seal the request, obtain the wallet signature, assemble and
//! encode the envelope, compute the fee value, and hand the transaction to
//! the provider for broadcast.
//!
//! The pipeline is strictly ordered and all-or-nothing: any failure
//! discards every intermediate value (ciphertext, hash, partial envelope).
//! A retry starts from the top with a fresh nonce; a signature over a
//! stale hash is never resubmitted. A submission guard prevents two
//! submissions from interleaving on the same session.

use crate::config::{ChainRegistry, GatewayConfig};
use crate::crypto::{keccak256, seal, signing_hash, NONCE_SIZE};
use crate::envelope::{assemble, encode_send, EnvelopeParts, PlaintextRequest, RelayEnvelope};
use crate::error::{RelayError, Result};
use crate::fee::{build_transaction, compute_value};
use crate::provider::{ChainMonitor, WalletProvider};
use crate::session::Session;
use ethers::types::{Address, H256, U256};
use rand::{rngs::OsRng, RngCore};
use std::str::FromStr;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Per-operation inputs to a confidential submission
#[derive(Debug, Clone)]
pub struct RequestParams {
    /// JSON-encoded application payload (e.g. `{"name":...,"description":...}`)
    pub data: String,
    /// Contract the router invokes with the result
    pub callback_address: Address,
    /// Callback gas limit; defaults to the configured limit
    pub callback_gas_limit: Option<u64>,
    /// Operation handle; defaults to the configured handle
    pub handle: Option<String>,
}

/// Outcome of a successful submission
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub tx_hash: H256,
    pub envelope: RelayEnvelope,
    pub signing_hash: [u8; 32],
    pub chain_id: String,
    pub router: Address,
    pub value: U256,
}

/// Client for submitting confidential requests through the gateway router
pub struct RelayClient<P, M> {
    config: GatewayConfig,
    registry: ChainRegistry,
    session: Session,
    provider: P,
    monitor: M,
    /// Declared sender public key (uncompressed SEC1, 65 bytes); the
    /// envelope self-check compares signature recovery against this
    sender_public_key: Vec<u8>,
    /// Serializes submissions so a pending one cannot share its nonce or
    /// session state with another
    submission_lock: Mutex<()>,
}

impl<P: WalletProvider, M: ChainMonitor> RelayClient<P, M> {
    pub fn new(
        config: GatewayConfig,
        session: Session,
        provider: P,
        monitor: M,
        sender_public_key: Vec<u8>,
    ) -> Self {
        Self {
            config,
            registry: ChainRegistry::new(),
            session,
            provider,
            monitor,
            sender_public_key,
            submission_lock: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Submit one confidential request
    ///
    /// Runs the full pipeline. Every error is terminal for this attempt;
    /// the caller decides whether to call `submit` again, which reruns the
    /// pipeline from scratch with a fresh nonce.
    pub async fn submit(&self, request: RequestParams) -> Result<SubmissionReceipt> {
        let _guard = self.submission_lock.lock().await;

        // 1. Resolve the active chain to a router contract
        let chain_id = self.monitor.chain_id().await?;
        let router = self.registry.router_for(&chain_id)?;
        debug!(chain_id = %chain_id, router = %router, "Resolved router contract");

        // 2. Sender identity from the provider
        let accounts = self.provider.request_accounts().await?;
        let sender_hex = accounts.first().ok_or_else(|| RelayError::Provider {
            operation: "request_accounts".to_string(),
            reason: "provider returned no accounts".to_string(),
        })?;
        let sender = Address::from_str(sender_hex).map_err(|e| RelayError::Provider {
            operation: "request_accounts".to_string(),
            reason: format!("invalid account address {}: {}", sender_hex, e),
        })?;

        let callback_gas_limit = request
            .callback_gas_limit
            .unwrap_or(self.config.callback_gas_limit);
        let handle = request
            .handle
            .as_deref()
            .unwrap_or(&self.config.handle)
            .to_string();

        // 3. Build and serialize the plaintext payload
        let plaintext = PlaintextRequest::build(
            &self.config,
            &request.data,
            sender,
            self.session.public_key(),
            request.callback_address,
            callback_gas_limit,
        )?;
        let plaintext_bytes = plaintext.to_bytes()?;

        // 4. Seal under the session key with a fresh nonce
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);
        let ciphertext = seal(self.session.shared_key(), &nonce, &plaintext_bytes)?;
        debug!(
            payload_bytes = plaintext_bytes.len(),
            sealed_bytes = ciphertext.len(),
            "Sealed relay payload"
        );

        // 5. Wallet signature over the ciphertext hash. The wallet applies
        // the EIP-191 prefix, so recovery runs over signing_hash(ciphertext).
        let ciphertext_hash = keccak256(&ciphertext);
        let payload_hash = signing_hash(&ciphertext);
        let signature = self
            .provider
            .personal_sign(sender_hex, ciphertext_hash)
            .await?;

        // 6. Assemble the envelope; aborts on signer mismatch
        let envelope = assemble(
            &self.config,
            self.session.public_key(),
            &handle,
            &EnvelopeParts {
                sender_public_key: &self.sender_public_key,
                nonce: &nonce,
                ciphertext: &ciphertext,
                signature: &signature,
                callback_gas_limit,
            },
        )?;

        // 7. Encode the router call and attach the fee value
        let calldata = encode_send(payload_hash, sender, self.config.routing_contract, &envelope)?;
        let gas_price = self.provider.gas_price().await?;
        let (margin_num, margin_den) = self.config.fee_margin;
        let value = compute_value(gas_price, callback_gas_limit, margin_num, margin_den)?;

        let tx = build_transaction(router, sender, value, self.config.tx_gas_limit, calldata);

        // 8. Broadcast through the provider
        let tx_hash = self.provider.send_transaction(tx).await?;
        info!(
            tx_hash = %tx_hash,
            chain_id = %chain_id,
            handle = %handle,
            "Relay envelope submitted"
        );

        Ok(SubmissionReceipt {
            tx_hash,
            envelope,
            signing_hash: payload_hash,
            chain_id,
            router,
            value,
        })
    }
}
