// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client Session State
//!
//! A `Session` holds the ephemeral secp256k1 keypair and the shared key
//! derived against the gateway's public key. It is an explicit value the
//! caller creates and threads through the pipeline, so multiple sessions
//! can coexist (and tests can use fixed keys) without process-wide state.
//!
//! Key material is immutable after creation and never persisted. Dropping
//! a session discards the ephemeral secret; the shared key it derived is
//! only needed for the session's own lifetime.

use crate::crypto::{derive_shared_key, SHARED_KEY_SIZE};
use crate::error::Result;
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use rand::rngs::OsRng;

/// Ephemeral keypair plus the gateway shared key for one client session
pub struct Session {
    /// Compressed SEC1 encoding of the ephemeral public key (33 bytes)
    public_key: [u8; 33],
    /// Symmetric key shared with the gateway
    shared_key: [u8; SHARED_KEY_SIZE],
}

impl Session {
    /// Establish a fresh session against the gateway public key
    ///
    /// Generates a new random ephemeral keypair from the OS CSPRNG and
    /// derives the shared key immediately. The ephemeral secret scalar is
    /// dropped here; only the public key and shared key are retained, which
    /// is all later pipeline steps need.
    ///
    /// # Errors
    ///
    /// `RelayError::KeyAgreement` if the gateway public key is malformed.
    pub fn establish(gateway_public_key: &[u8]) -> Result<Self> {
        let secret = SecretKey::random(&mut OsRng);
        Self::from_secret_key(&secret, gateway_public_key)
    }

    /// Establish a session from a caller-supplied ephemeral secret
    ///
    /// Used by tests that need deterministic sessions; the derivation is a
    /// pure function of the two keys.
    pub fn from_secret_key(secret: &SecretKey, gateway_public_key: &[u8]) -> Result<Self> {
        let shared_key = derive_shared_key(&secret.to_bytes(), gateway_public_key)?;

        let encoded = secret.public_key().to_encoded_point(true);
        let mut public_key = [0u8; 33];
        public_key.copy_from_slice(encoded.as_bytes());

        Ok(Self {
            public_key,
            shared_key,
        })
    }

    /// Compressed ephemeral public key (33 bytes)
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }

    /// Shared symmetric key for this session
    pub fn shared_key(&self) -> &[u8; SHARED_KEY_SIZE] {
        &self.shared_key
    }
}
