// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Confidential Relay Crypto Primitives
//!
//! The cryptographic leg of the relay envelope protocol:
//!
//! - **ECDH**: ephemeral-static key exchange on secp256k1 against the
//!   gateway's fixed public key
//! - **Sealing**: ChaCha20-Poly1305 AEAD over the serialized payload
//! - **Signing**: keccak personal-sign hash over the ciphertext plus ECDSA
//!   public key recovery for the pre-submission self-check
//!
//! ## Security Considerations
//!
//! - The ephemeral secret and shared key live in memory only, never persisted
//! - Nonces must be unique per sealing under a given shared key
//! - The recovered signer is compared against the declared sender before any
//!   envelope leaves the client

pub mod ecdh;
pub mod seal;
pub mod signing;

pub use ecdh::{derive_shared_key, SHARED_KEY_SIZE};
pub use seal::{open, seal, NONCE_SIZE, TAG_SIZE};
pub use signing::{keccak256, public_key_to_address, recover_signer, signing_hash};
