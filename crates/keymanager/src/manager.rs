//! [`AesGcmKeyManager`]: the single entry point used by key registries.
//!
//! Exposes two narrow capabilities:
//! - [`KeyFactory`]: validate a [`KeyFormatDescriptor`] and create a key.
//! - [`PrimitiveFactory`]: bind a [`KeyRecord`] to an [`Aead`] primitive.
//!
//! Choosing which manager handles a given algorithm is the registry's job.

use std::sync::Arc;

use crate::crypto::random::{OsRandom, SecureRandom};
use crate::crypto::{Aead, AesGcmAead};
use crate::key::{KeyFormatValidator, KeyGenerator, KeyRecord};
use common::{KeyFormatDescriptor, KeyFormatError};

/// Identifier a registry can dispatch on.
pub const KEY_TYPE: &str = "aes-gcm";

/// Format validation and key creation.
pub trait KeyFactory {
    /// The validator applied by [`KeyFactory::create_key`].
    fn key_format_validator(&self) -> KeyFormatValidator;

    /// Validate `descriptor` without creating anything.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFormatError::UnsupportedKeySize`] for sizes other than 16 or 32.
    fn validate_key_format(&self, descriptor: &KeyFormatDescriptor) -> Result<(), KeyFormatError> {
        self.key_format_validator().validate(descriptor)
    }

    /// Create a fresh key for `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFormatError::UnsupportedKeySize`] or
    /// [`KeyFormatError::EntropyUnavailable`].
    fn create_key(&self, descriptor: &KeyFormatDescriptor) -> Result<KeyRecord, KeyFormatError>;
}

/// Key-to-primitive conversion.
pub trait PrimitiveFactory {
    /// Primitive produced by [`PrimitiveFactory::get_primitive`].
    type Primitive: Aead;

    /// Consume `key` and bind it to a new primitive.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFormatError::UnsupportedKeySize`] if the key length is invalid.
    fn get_primitive(&self, key: KeyRecord) -> Result<Self::Primitive, KeyFormatError>;
}

/// Key manager for AES-GCM with 128- and 256-bit keys.
///
/// Cheap to clone; all clones share one random source.
#[derive(Clone)]
pub struct AesGcmKeyManager {
    rng: Arc<dyn SecureRandom>,
    generator: KeyGenerator,
}

impl AesGcmKeyManager {
    /// Manager backed by the operating-system CSPRNG.
    pub fn new() -> Self {
        Self::with_random_source(Arc::new(OsRandom))
    }

    /// Manager using `rng` for both key generation and nonces.
    pub fn with_random_source(rng: Arc<dyn SecureRandom>) -> Self {
        Self {
            generator: KeyGenerator::with_random_source(Arc::clone(&rng)),
            rng,
        }
    }

    /// Registry identifier, see [`KEY_TYPE`].
    pub fn key_type(&self) -> &'static str {
        KEY_TYPE
    }
}

impl Default for AesGcmKeyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AesGcmKeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmKeyManager")
            .field("key_type", &KEY_TYPE)
            .finish_non_exhaustive()
    }
}

impl KeyFactory for AesGcmKeyManager {
    fn key_format_validator(&self) -> KeyFormatValidator {
        KeyFormatValidator
    }

    fn create_key(&self, descriptor: &KeyFormatDescriptor) -> Result<KeyRecord, KeyFormatError> {
        self.generator.generate(descriptor)
    }
}

impl PrimitiveFactory for AesGcmKeyManager {
    type Primitive = AesGcmAead;

    fn get_primitive(&self, key: KeyRecord) -> Result<AesGcmAead, KeyFormatError> {
        AesGcmAead::bind_with_random_source(key, Arc::clone(&self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::random::{EntropyError, MockSecureRandom};
    use common::AeadError;
    use std::collections::HashSet;

    #[test]
    fn validate_key_format_valid() {
        let m = AesGcmKeyManager::new();
        assert!(m.validate_key_format(&KeyFormatDescriptor::new(16)).is_ok());
        assert!(m.validate_key_format(&KeyFormatDescriptor::new(32)).is_ok());
    }

    #[test]
    fn validate_key_format_invalid() {
        let m = AesGcmKeyManager::new();
        for size in [0u32, 1, 15, 17, 24, 31, 33, 64] {
            assert_eq!(
                m.validate_key_format(&KeyFormatDescriptor::new(size)),
                Err(KeyFormatError::UnsupportedKeySize(size as usize))
            );
            assert_eq!(
                m.create_key(&KeyFormatDescriptor::new(size)).unwrap_err(),
                KeyFormatError::UnsupportedKeySize(size as usize)
            );
        }
    }

    #[test]
    fn create_key_sizes() {
        let m = AesGcmKeyManager::new();
        assert_eq!(m.create_key(&KeyFormatDescriptor::aes128()).unwrap().len(), 16);
        assert_eq!(m.create_key(&KeyFormatDescriptor::aes256()).unwrap().len(), 32);
    }

    #[test]
    fn create_key_multiple_times() {
        let m = AesGcmKeyManager::new();
        let keys: HashSet<String> = (0..50)
            .map(|_| hex::encode(m.create_key(&KeyFormatDescriptor::aes128()).unwrap().key_value()))
            .collect();
        assert_eq!(keys.len(), 50);
    }

    #[test]
    fn ciphertext_size() {
        let m = AesGcmKeyManager::new();
        let key = m.create_key(&KeyFormatDescriptor::aes256()).unwrap();
        let aead = m.get_primitive(key).unwrap();
        let plaintext = b"plaintext";
        let ct = aead.encrypt(plaintext, b"associatedData").unwrap();
        assert_eq!(ct.len(), 12 + plaintext.len() + 16);
        assert_eq!(aead.decrypt(&ct, b"associatedData").unwrap(), plaintext);
    }

    #[test]
    fn get_primitive_accepts_external_key() {
        let m = AesGcmKeyManager::new();
        let aead = m.get_primitive(KeyRecord::from_slice(&[7u8; 16])).unwrap();
        assert_eq!(aead.key_size(), 16);
    }

    #[test]
    fn get_primitive_rejects_bad_key() {
        let m = AesGcmKeyManager::new();
        assert_eq!(
            m.get_primitive(KeyRecord::from_slice(&[7u8; 24])).unwrap_err(),
            KeyFormatError::UnsupportedKeySize(24)
        );
    }

    #[test]
    fn usable_as_trait_object() {
        let m = AesGcmKeyManager::new();
        let key = m.create_key(&KeyFormatDescriptor::aes128()).unwrap();
        let aead: Box<dyn Aead> = Box::new(m.get_primitive(key).unwrap());
        let ct = aead.encrypt(b"hi", b"").unwrap();
        assert_eq!(aead.decrypt(&ct, b"").unwrap(), b"hi");
    }

    #[test]
    fn random_source_shared_with_primitives() {
        let mut rng = MockSecureRandom::new();
        rng.expect_fill()
            .returning(|_| Err(EntropyError("unplugged".into())));
        let m = AesGcmKeyManager::with_random_source(Arc::new(rng));
        assert!(matches!(
            m.create_key(&KeyFormatDescriptor::aes128()),
            Err(KeyFormatError::EntropyUnavailable(_))
        ));
        let aead = m.get_primitive(KeyRecord::from_slice(&[1u8; 32])).unwrap();
        assert!(matches!(
            aead.encrypt(b"x", b""),
            Err(AeadError::EntropyUnavailable(_))
        ));
    }

    #[test]
    fn key_type_identifier() {
        assert_eq!(AesGcmKeyManager::new().key_type(), "aes-gcm");
    }
}
