//! AES-GCM AEAD primitive, its wire format, and the random source behind it.
//!
//! This module is free of configuration and logging setup; it only emits
//! `tracing` events.
//!
//! # Ciphertext format
//!
//! ```text
//! nonce (12 bytes) || ciphertext body (len(plaintext) bytes) || tag (16 bytes)
//! ```

pub mod aead;
pub mod random;
pub mod wire;

pub use aead::AesGcmAead;
pub use random::{EntropyError, OsRandom, SecureRandom};
pub use wire::{CiphertextParts, CIPHERTEXT_OVERHEAD, NONCE_LEN, TAG_LEN};

use common::AeadError;

/// Authenticated encryption with associated data.
///
/// Object-safe so registries can hold `Box<dyn Aead>` without knowing the
/// algorithm family.
pub trait Aead: Send + Sync {
    /// Encrypt `plaintext`, authenticating `associated_data` alongside it.
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::EntropyUnavailable`] if no nonce could be drawn,
    /// or [`AeadError::PlaintextTooLong`] past the per-message limit.
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError>;

    /// Verify and decrypt `ciphertext` produced by [`Aead::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::CiphertextTooShort`] if the input cannot hold the
    /// envelope, or [`AeadError::AuthenticationFailed`] on any verification
    /// failure. No plaintext is returned on failure.
    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError>;
}

impl<T: Aead + ?Sized> Aead for Box<T> {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        (**self).encrypt(plaintext, associated_data)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        (**self).decrypt(ciphertext, associated_data)
    }
}
