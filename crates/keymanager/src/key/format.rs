//! Key format validation.
//!
//! Only 16- and 32-byte keys are accepted. AES-192 is deliberately not
//! supported; do not add 24 to [`SUPPORTED_KEY_SIZES`].

use common::{KeyFormatDescriptor, KeyFormatError};

/// Accepted key lengths in bytes.
pub const SUPPORTED_KEY_SIZES: [usize; 2] = [16, 32];

/// Check a raw key length against [`SUPPORTED_KEY_SIZES`].
///
/// # Errors
///
/// Returns [`KeyFormatError::UnsupportedKeySize`] for any other length.
pub fn validate_key_size(len: usize) -> Result<(), KeyFormatError> {
    if SUPPORTED_KEY_SIZES.contains(&len) {
        Ok(())
    } else {
        Err(KeyFormatError::UnsupportedKeySize(len))
    }
}

/// Stateless validator for [`KeyFormatDescriptor`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyFormatValidator;

impl KeyFormatValidator {
    /// Accept only `key_size_bytes` of 16 or 32.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFormatError::UnsupportedKeySize`] otherwise.
    pub fn validate(&self, descriptor: &KeyFormatDescriptor) -> Result<(), KeyFormatError> {
        validate_key_size(descriptor.key_size_bytes as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_sizes() {
        let v = KeyFormatValidator;
        assert!(v.validate(&KeyFormatDescriptor::new(16)).is_ok());
        assert!(v.validate(&KeyFormatDescriptor::new(32)).is_ok());
    }

    #[test]
    fn rejects_everything_else() {
        let v = KeyFormatValidator;
        for size in [0u32, 1, 15, 17, 24, 31, 33, 64, u32::MAX] {
            assert_eq!(
                v.validate(&KeyFormatDescriptor::new(size)),
                Err(KeyFormatError::UnsupportedKeySize(size as usize)),
                "size {size} must be rejected"
            );
        }
    }

    #[test]
    fn default_descriptor_is_rejected() {
        // A zero-valued descriptor is the "empty format" case.
        assert!(KeyFormatValidator
            .validate(&KeyFormatDescriptor::new(0))
            .is_err());
    }

    #[test]
    fn aes192_is_not_supported() {
        assert_eq!(
            validate_key_size(24),
            Err(KeyFormatError::UnsupportedKeySize(24))
        );
    }
}
