//! [`AesGcmAead`]: AES-GCM bound to one key.
//!
//! Every [`encrypt`](Aead::encrypt) draws a fresh random 96-bit nonce, so the
//! primitive is stateless and may be shared across threads. Do NOT replace the
//! random nonce with a counter: uniqueness would then have to hold across
//! process restarts and across every instance holding the same key.

use std::sync::Arc;

use aes_gcm::{
    aead::{
        consts::{U12, U16},
        generic_array::GenericArray,
        AeadInPlace, KeyInit,
    },
    Aes128Gcm, Aes256Gcm,
};
use tracing::debug;
use zeroize::Zeroize;

use super::random::{OsRandom, SecureRandom};
use super::wire::{ciphertext_len, CiphertextParts, NONCE_LEN};
use super::Aead;
use crate::key::KeyRecord;
use common::{AeadError, KeyFormatError};

/// Expanded AES key schedule for one of the two supported key sizes.
enum GcmCipher {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

impl GcmCipher {
    fn new(key: &KeyRecord) -> Result<Self, KeyFormatError> {
        key.validate()?;
        let bad_len = |_| KeyFormatError::UnsupportedKeySize(key.len());
        match key.len() {
            16 => Aes128Gcm::new_from_slice(key.key_value())
                .map(GcmCipher::Aes128)
                .map_err(bad_len),
            _ => Aes256Gcm::new_from_slice(key.key_value())
                .map(GcmCipher::Aes256)
                .map_err(bad_len),
        }
    }

    fn seal_detached(
        &self,
        nonce: &[u8],
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> Result<GenericArray<u8, U16>, AeadError> {
        match self {
            GcmCipher::Aes128(c) => seal_with(c, nonce, associated_data, buffer),
            GcmCipher::Aes256(c) => seal_with(c, nonce, associated_data, buffer),
        }
    }

    fn open_detached(
        &self,
        nonce: &[u8],
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &[u8],
    ) -> Result<(), AeadError> {
        match self {
            GcmCipher::Aes128(c) => open_with(c, nonce, associated_data, buffer, tag),
            GcmCipher::Aes256(c) => open_with(c, nonce, associated_data, buffer, tag),
        }
    }
}

fn seal_with<C>(
    cipher: &C,
    nonce: &[u8],
    associated_data: &[u8],
    buffer: &mut [u8],
) -> Result<GenericArray<u8, U16>, AeadError>
where
    C: AeadInPlace<NonceSize = U12, TagSize = U16>,
{
    cipher
        .encrypt_in_place_detached(GenericArray::from_slice(nonce), associated_data, buffer)
        // The only failure mode is the per-message length limit.
        .map_err(|_| AeadError::PlaintextTooLong)
}

fn open_with<C>(
    cipher: &C,
    nonce: &[u8],
    associated_data: &[u8],
    buffer: &mut [u8],
    tag: &[u8],
) -> Result<(), AeadError>
where
    C: AeadInPlace<NonceSize = U12, TagSize = U16>,
{
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(nonce),
            associated_data,
            buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| AeadError::AuthenticationFailed)
}

/// AES-GCM authenticated encryption bound to a single key.
///
/// Immutable after [`bind`](Self::bind). The key schedule is zeroized on drop.
pub struct AesGcmAead {
    cipher: GcmCipher,
    key_size: usize,
    rng: Arc<dyn SecureRandom>,
}

impl AesGcmAead {
    /// Bind `key` to a new primitive drawing nonces from the OS CSPRNG.
    ///
    /// The key length is re-checked here because records may arrive from
    /// outside the generator.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFormatError::UnsupportedKeySize`] unless the key is 16 or 32 bytes.
    pub fn bind(key: KeyRecord) -> Result<Self, KeyFormatError> {
        Self::bind_with_random_source(key, Arc::new(OsRandom))
    }

    /// Bind `key` with an explicit nonce source.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFormatError::UnsupportedKeySize`] unless the key is 16 or 32 bytes.
    pub fn bind_with_random_source(
        key: KeyRecord,
        rng: Arc<dyn SecureRandom>,
    ) -> Result<Self, KeyFormatError> {
        let cipher = GcmCipher::new(&key)?;
        debug!(key_size = key.len(), "bound AES-GCM primitive");
        Ok(Self {
            cipher,
            key_size: key.len(),
            rng,
        })
        // `key` drops here and its bytes are scrubbed.
    }

    /// Length in bytes of the bound key.
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Encrypt with a caller-chosen nonce. Only the public `encrypt` path and
    /// the known-answer suite (via an injected nonce source) reach this.
    fn seal(
        &self,
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>, AeadError> {
        let mut out = Vec::with_capacity(ciphertext_len(plaintext.len()));
        out.extend_from_slice(nonce);
        out.extend_from_slice(plaintext);
        let tag = self
            .cipher
            .seal_detached(nonce, associated_data, &mut out[NONCE_LEN..])?;
        out.extend_from_slice(tag.as_slice());
        Ok(out)
    }
}

impl Aead for AesGcmAead {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        let mut nonce = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce)
            .map_err(|e| AeadError::EntropyUnavailable(e.0))?;
        self.seal(&nonce, plaintext, associated_data)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        let parts = CiphertextParts::split(ciphertext)?;
        let mut buffer = parts.body.to_vec();
        if let Err(e) = self
            .cipher
            .open_detached(parts.nonce, associated_data, &mut buffer, parts.tag)
        {
            buffer.zeroize();
            debug!(input_len = ciphertext.len(), "AES-GCM tag verification failed");
            return Err(e);
        }
        Ok(buffer)
    }
}

impl std::fmt::Debug for AesGcmAead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmAead")
            .field("key_size", &self.key_size)
            .finish_non_exhaustive()
    }
}
