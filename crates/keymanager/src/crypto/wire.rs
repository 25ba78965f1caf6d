//! Ciphertext layout: `NONCE (12) || BODY (N) || TAG (16)`.
//!
//! The layout is fixed; alternate IV or tag sizes are not supported.

use common::AeadError;

/// Byte length of the GCM nonce (96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag (128 bits).
pub const TAG_LEN: usize = 16;

/// Bytes added to every plaintext by [`super::AesGcmAead::encrypt`].
pub const CIPHERTEXT_OVERHEAD: usize = NONCE_LEN + TAG_LEN;

/// Borrowed view of the three regions of a ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CiphertextParts<'a> {
    pub nonce: &'a [u8],
    pub body: &'a [u8],
    pub tag: &'a [u8],
}

impl<'a> CiphertextParts<'a> {
    /// Split a ciphertext into nonce, body and tag.
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::CiphertextTooShort`] if `input` is shorter than
    /// [`CIPHERTEXT_OVERHEAD`].
    pub fn split(input: &'a [u8]) -> Result<Self, AeadError> {
        if input.len() < CIPHERTEXT_OVERHEAD {
            return Err(AeadError::CiphertextTooShort(input.len()));
        }
        let (nonce, rest) = input.split_at(NONCE_LEN);
        let (body, tag) = rest.split_at(rest.len() - TAG_LEN);
        Ok(Self { nonce, body, tag })
    }
}

/// Output length for a plaintext of `plaintext_len` bytes.
pub const fn ciphertext_len(plaintext_len: usize) -> usize {
    plaintext_len + CIPHERTEXT_OVERHEAD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_minimum_envelope() {
        let input = [7u8; CIPHERTEXT_OVERHEAD];
        let parts = CiphertextParts::split(&input).unwrap();
        assert_eq!(parts.nonce.len(), NONCE_LEN);
        assert!(parts.body.is_empty());
        assert_eq!(parts.tag.len(), TAG_LEN);
    }

    #[test]
    fn split_regions() {
        let mut input = vec![1u8; NONCE_LEN];
        input.extend_from_slice(b"body");
        input.extend_from_slice(&[2u8; TAG_LEN]);
        let parts = CiphertextParts::split(&input).unwrap();
        assert_eq!(parts.nonce, &[1u8; NONCE_LEN][..]);
        assert_eq!(parts.body, b"body");
        assert_eq!(parts.tag, &[2u8; TAG_LEN][..]);
    }

    #[test]
    fn split_rejects_short_input() {
        for len in [0, 1, 12, 16, 27] {
            let input = vec![0u8; len];
            assert_eq!(
                CiphertextParts::split(&input),
                Err(AeadError::CiphertextTooShort(len))
            );
        }
    }

    #[test]
    fn length_law() {
        assert_eq!(ciphertext_len(0), 28);
        assert_eq!(ciphertext_len(9), 37);
    }
}
