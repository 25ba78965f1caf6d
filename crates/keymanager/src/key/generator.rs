//! Fresh key material from a [`SecureRandom`] source.

use std::sync::Arc;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::format::KeyFormatValidator;
use super::record::KeyRecord;
use crate::crypto::random::{OsRandom, SecureRandom};
use common::{KeyFormatDescriptor, KeyFormatError};

/// Produces [`KeyRecord`]s of a validated size.
///
/// Holds no counter or seed of its own; every key is a fresh draw from the
/// shared random source, so concurrent callers cannot collide through it.
#[derive(Clone)]
pub struct KeyGenerator {
    rng: Arc<dyn SecureRandom>,
    validator: KeyFormatValidator,
}

impl KeyGenerator {
    /// Generator backed by the operating-system CSPRNG.
    pub fn new() -> Self {
        Self::with_random_source(Arc::new(OsRandom))
    }

    /// Generator backed by an explicit random source.
    pub fn with_random_source(rng: Arc<dyn SecureRandom>) -> Self {
        Self {
            rng,
            validator: KeyFormatValidator,
        }
    }

    /// Validate `descriptor`, then draw `key_size_bytes` random bytes.
    ///
    /// # Errors
    ///
    /// - [`KeyFormatError::UnsupportedKeySize`] if the size is not 16 or 32;
    ///   nothing is drawn in that case.
    /// - [`KeyFormatError::EntropyUnavailable`] if the random source fails.
    ///   Not retried.
    pub fn generate(&self, descriptor: &KeyFormatDescriptor) -> Result<KeyRecord, KeyFormatError> {
        self.validator.validate(descriptor)?;

        let mut buf = Zeroizing::new(vec![0u8; descriptor.key_size_bytes as usize]);
        if let Err(e) = self.rng.fill(&mut buf) {
            warn!(error = %e, "entropy source failed during key generation");
            return Err(KeyFormatError::EntropyUnavailable(e.0));
        }

        debug!(key_size = descriptor.key_size_bytes, "generated AES-GCM key");
        Ok(KeyRecord::new(buf))
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyGenerator")
    }
}
