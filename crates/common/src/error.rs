//! Error taxonomy shared by the key manager and its callers.

use thiserror::Error;

/// A key format or key length was rejected, or key material could not be drawn.
///
/// These are configuration failures: retrying with the same input never helps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyFormatError {
    /// Requested or supplied key length is not 16 or 32 bytes.
    #[error("unsupported AES-GCM key size: {0} bytes (expected 16 or 32)")]
    UnsupportedKeySize(usize),

    /// The secure random source failed to produce bytes.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Failures of the AEAD primitive itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AeadError {
    /// Input cannot hold the 12-byte nonce and 16-byte tag envelope.
    #[error("ciphertext too short: {0} bytes")]
    CiphertextTooShort(usize),

    /// Tag verification failed.
    ///
    /// Deliberately carries no detail: a corrupted body, wrong associated data
    /// and a wrong key are indistinguishable to the caller.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The secure random source failed while drawing a nonce.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    /// Plaintext exceeds the AES-GCM per-message limit.
    #[error("plaintext too long for AES-GCM")]
    PlaintextTooLong,
}

/// Either family of failure, for callers that handle both in one place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error(transparent)]
    KeyFormat(#[from] KeyFormatError),

    #[error(transparent)]
    Aead(#[from] AeadError),
}

impl CryptoError {
    /// Coarse classification suitable for metrics labels and log fields.
    ///
    /// - `"configuration"`: bad key size
    /// - `"entropy"`: the random source failed
    /// - `"integrity"`: malformed or tampered ciphertext
    /// - `"input"`: plaintext over the per-message limit
    pub fn category(&self) -> &'static str {
        match self {
            CryptoError::KeyFormat(KeyFormatError::UnsupportedKeySize(_)) => "configuration",
            CryptoError::KeyFormat(KeyFormatError::EntropyUnavailable(_)) => "entropy",
            CryptoError::Aead(AeadError::EntropyUnavailable(_)) => "entropy",
            CryptoError::Aead(AeadError::CiphertextTooShort(_)) => "integrity",
            CryptoError::Aead(AeadError::AuthenticationFailed) => "integrity",
            CryptoError::Aead(AeadError::PlaintextTooLong) => "input",
        }
    }
}
