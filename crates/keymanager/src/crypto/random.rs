//! Secure random byte source used for key generation and per-call nonces.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use thiserror::Error;

/// The underlying entropy source could not fill the buffer.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct EntropyError(pub String);

/// A cryptographically secure byte source.
///
/// Implementations must be safe to share across threads: concurrent calls may
/// never return correlated or duplicate output. Any internal state is the
/// implementation's to synchronise.
#[cfg_attr(test, mockall::automock)]
pub trait SecureRandom: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EntropyError`] if the source is unavailable. On error the
    /// contents of `dest` are unspecified and must not be used.
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// Operating-system CSPRNG (`getrandom`). Stateless on our side.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| EntropyError(e.to_string()))
    }
}
