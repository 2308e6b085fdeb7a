// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Confidential relay envelope client
//!
//! Submits confidential requests to a privacy-preserving destination
//! network through a public gateway/router contract. The pipeline:
//!
//! 1. Client derives a session key via ECDH against the gateway's fixed
//!    public key
//! 2. The serialized request is sealed with ChaCha20-Poly1305
//! 3. The wallet personal-signs the ciphertext hash, binding it to the
//!    sender's identity
//! 4. Routing metadata, nonce, sealed payload, and signature are assembled
//!    into the envelope the router contract consumes
//! 5. The encoded call plus the fee value is handed to the external
//!    wallet/provider for broadcast
//!
//! The wallet, chain monitor, and fee oracle are external collaborators
//! behind the `provider` traits; the core performs no network I/O.

pub mod client;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod fee;
pub mod provider;
pub mod session;

pub use client::{RelayClient, RequestParams, SubmissionReceipt};
pub use config::{ChainProfile, ChainRegistry, GatewayConfig};
pub use crypto::{
    derive_shared_key, keccak256, open, public_key_to_address, recover_signer, seal, signing_hash,
    NONCE_SIZE, SHARED_KEY_SIZE, TAG_SIZE,
};
pub use envelope::{assemble, encode_send, EnvelopeParts, PlaintextRequest, RelayEnvelope};
pub use error::{RelayError, Result};
pub use fee::{build_transaction, compute_value};
pub use provider::{ChainMonitor, LocalWalletProvider, StaticChainMonitor, WalletProvider};
pub use session::Session;
