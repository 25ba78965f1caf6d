//! [`KeyRecord`]: owned, move-only symmetric key material.

use zeroize::Zeroizing;

use super::format::validate_key_size;
use common::KeyFormatError;

/// Raw AES-GCM key bytes.
///
/// Not `Clone`: a copy must be made explicitly with [`KeyRecord::from_slice`].
/// The buffer is overwritten with zeroes on drop and never printed by `Debug`.
///
/// A record built from external bytes is not validated on construction; the
/// length is checked when it is bound to a primitive.
pub struct KeyRecord {
    key_value: Zeroizing<Vec<u8>>,
}

impl KeyRecord {
    /// Take ownership of an already-zeroizing buffer.
    pub fn new(key_value: Zeroizing<Vec<u8>>) -> Self {
        Self { key_value }
    }

    /// Copy key bytes out of a borrowed slice.
    ///
    /// The caller remains responsible for scrubbing its own copy.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(Zeroizing::new(bytes.to_vec()))
    }

    /// Borrow the key bytes.
    pub fn key_value(&self) -> &[u8] {
        &self.key_value
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.key_value.len()
    }

    /// `true` if the record holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.key_value.is_empty()
    }

    /// Check the length against the supported key sizes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFormatError::UnsupportedKeySize`] if the record is not 16 or 32 bytes.
    pub fn validate(&self) -> Result<(), KeyFormatError> {
        validate_key_size(self.len())
    }
}

impl From<Vec<u8>> for KeyRecord {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(Zeroizing::new(bytes))
    }
}

impl std::fmt::Debug for KeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Length only.
        f.debug_struct("KeyRecord")
            .field("len", &self.len())
            .field("key_value", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_in_debug() {
        let key = KeyRecord::from(vec![0xAB; 16]);
        let dbg = format!("{key:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains("171"));
        assert!(dbg.contains("16"));
    }

    #[test]
    fn from_slice_copies() {
        let src = [0x42u8; 32];
        let key = KeyRecord::from_slice(&src);
        assert_eq!(key.key_value(), &src[..]);
        assert_eq!(key.len(), 32);
        assert!(!key.is_empty());
    }

    #[test]
    fn validate_checks_length() {
        assert!(KeyRecord::from(vec![0u8; 16]).validate().is_ok());
        assert!(KeyRecord::from(vec![0u8; 32]).validate().is_ok());
        assert_eq!(
            KeyRecord::from(vec![0u8; 24]).validate(),
            Err(KeyFormatError::UnsupportedKeySize(24))
        );
        assert!(KeyRecord::from(Vec::new()).validate().is_err());
    }
}
