//! NIST GCM known-answer tests.
//!
//! Vectors come from the revised GCM specification (McGrew & Viega), limited
//! to those with a 96-bit IV and 128-bit tag. Each vector is checked in both
//! directions:
//!
//! - decryption of `IV || ciphertext || tag` through [`PrimitiveFactory::get_primitive`];
//! - encryption through a primitive whose nonce source is pinned to the
//!   vector's IV. This is the only place a caller-chosen nonce is used.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::crypto::random::{EntropyError, SecureRandom};
use crate::crypto::{Aead, AesGcmAead, NONCE_LEN};
use crate::key::KeyRecord;
use crate::manager::{AesGcmKeyManager, PrimitiveFactory};
use common::CryptoError;

/// A single NIST vector, hex-encoded.
#[derive(Debug, Clone, Copy)]
pub struct KnownAnswer {
    pub name: &'static str,
    pub key: &'static str,
    pub plaintext: &'static str,
    pub aad: &'static str,
    pub iv: &'static str,
    pub ciphertext: &'static str,
    pub tag: &'static str,
}

const TC3_PLAINTEXT: &str = concat!(
    "d9313225f88406e5a55909c5aff5269a",
    "86a7a9531534f7da2e4c303d8a318a72",
    "1c3c0c95956809532fcf0e2449a6b525",
    "b16aedf5aa0de657ba637b391aafd255",
);

const TC4_PLAINTEXT: &str = concat!(
    "d9313225f88406e5a55909c5aff5269a",
    "86a7a9531534f7da2e4c303d8a318a72",
    "1c3c0c95956809532fcf0e2449a6b525",
    "b16aedf5aa0de657ba637b39",
);

const TC4_AAD: &str = "feedfacedeadbeeffeedfacedeadbeefabaddad2";

/// Test cases 1-4 (AES-128) and 13-16 (AES-256).
pub const NIST_VECTORS: &[KnownAnswer] = &[
    KnownAnswer {
        name: "Test Case 1",
        key: "00000000000000000000000000000000",
        plaintext: "",
        aad: "",
        iv: "000000000000000000000000",
        ciphertext: "",
        tag: "58e2fccefa7e3061367f1d57a4e7455a",
    },
    KnownAnswer {
        name: "Test Case 2",
        key: "00000000000000000000000000000000",
        plaintext: "00000000000000000000000000000000",
        aad: "",
        iv: "000000000000000000000000",
        ciphertext: "0388dace60b6a392f328c2b971b2fe78",
        tag: "ab6e47d42cec13bdf53a67b21257bddf",
    },
    KnownAnswer {
        name: "Test Case 3",
        key: "feffe9928665731c6d6a8f9467308308",
        plaintext: TC3_PLAINTEXT,
        aad: "",
        iv: "cafebabefacedbaddecaf888",
        ciphertext: concat!(
            "42831ec2217774244b7221b784d0d49c",
            "e3aa212f2c02a4e035c17e2329aca12e",
            "21d514b25466931c7d8f6a5aac84aa05",
            "1ba30b396a0aac973d58e091473f5985",
        ),
        tag: "4d5c2af327cd64a62cf35abd2ba6fab4",
    },
    KnownAnswer {
        name: "Test Case 4",
        key: "feffe9928665731c6d6a8f9467308308",
        plaintext: TC4_PLAINTEXT,
        aad: TC4_AAD,
        iv: "cafebabefacedbaddecaf888",
        ciphertext: concat!(
            "42831ec2217774244b7221b784d0d49c",
            "e3aa212f2c02a4e035c17e2329aca12e",
            "21d514b25466931c7d8f6a5aac84aa05",
            "1ba30b396a0aac973d58e091",
        ),
        tag: "5bc94fbc3221a5db94fae95ae7121a47",
    },
    KnownAnswer {
        name: "Test Case 13",
        key: "0000000000000000000000000000000000000000000000000000000000000000",
        plaintext: "",
        aad: "",
        iv: "000000000000000000000000",
        ciphertext: "",
        tag: "530f8afbc74536b9a963b4f1c4cb738b",
    },
    KnownAnswer {
        name: "Test Case 14",
        key: "0000000000000000000000000000000000000000000000000000000000000000",
        plaintext: "00000000000000000000000000000000",
        aad: "",
        iv: "000000000000000000000000",
        ciphertext: "cea7403d4d606b6e074ec5d3baf39d18",
        tag: "d0d1c8a799996bf0265b98b5d48ab919",
    },
    KnownAnswer {
        name: "Test Case 15",
        key: "feffe9928665731c6d6a8f9467308308feffe9928665731c6d6a8f9467308308",
        plaintext: TC3_PLAINTEXT,
        aad: "",
        iv: "cafebabefacedbaddecaf888",
        ciphertext: concat!(
            "522dc1f099567d07f47f37a32a84427d",
            "643a8cdcbfe5c0c97598a2bd2555d1aa",
            "8cb08e48590dbb3da7b08b1056828838",
            "c5f61e6393ba7a0abcc9f662898015ad",
        ),
        tag: "b094dac5d93471bdec1a502270e3cc6c",
    },
    KnownAnswer {
        name: "Test Case 16",
        key: "feffe9928665731c6d6a8f9467308308feffe9928665731c6d6a8f9467308308",
        plaintext: TC4_PLAINTEXT,
        aad: TC4_AAD,
        iv: "cafebabefacedbaddecaf888",
        ciphertext: concat!(
            "522dc1f099567d07f47f37a32a84427d",
            "643a8cdcbfe5c0c97598a2bd2555d1aa",
            "8cb08e48590dbb3da7b08b1056828838",
            "c5f61e6393ba7a0abcc9f662",
        ),
        tag: "76fc6ece0f4e1768cddf8853bb2d551b",
    },
];

/// A known-answer check failed.
#[derive(Debug, Error)]
pub enum SelfTestError {
    /// The vector table itself is malformed.
    #[error("{vector}: malformed test vector")]
    InvalidVector { vector: &'static str },

    /// The primitive returned an error where the vector expects success.
    #[error("{vector}: {source}")]
    Crypto {
        vector: &'static str,
        #[source]
        source: CryptoError,
    },

    /// The primitive succeeded but produced the wrong bytes.
    #[error("{vector}: {direction} output does not match")]
    Mismatch {
        vector: &'static str,
        direction: &'static str,
    },
}

/// Nonce source that always yields one fixed IV.
struct PinnedNonce([u8; NONCE_LEN]);

impl SecureRandom for PinnedNonce {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        if dest.len() != NONCE_LEN {
            return Err(EntropyError(format!(
                "pinned nonce source cannot fill {} bytes",
                dest.len()
            )));
        }
        dest.copy_from_slice(&self.0);
        Ok(())
    }
}

struct DecodedVector {
    key: Vec<u8>,
    plaintext: Vec<u8>,
    aad: Vec<u8>,
    iv: [u8; NONCE_LEN],
    sealed: Vec<u8>,
}

impl KnownAnswer {
    fn decode(&self) -> Result<DecodedVector, SelfTestError> {
        let bad = |_| SelfTestError::InvalidVector { vector: self.name };
        let iv: [u8; NONCE_LEN] = hex::decode(self.iv)
            .map_err(bad)?
            .try_into()
            .map_err(|_| SelfTestError::InvalidVector { vector: self.name })?;
        let mut sealed = iv.to_vec();
        sealed.extend(hex::decode(self.ciphertext).map_err(bad)?);
        sealed.extend(hex::decode(self.tag).map_err(bad)?);
        Ok(DecodedVector {
            key: hex::decode(self.key).map_err(bad)?,
            plaintext: hex::decode(self.plaintext).map_err(bad)?,
            aad: hex::decode(self.aad).map_err(bad)?,
            iv,
            sealed,
        })
    }

    /// Check this vector in both directions.
    ///
    /// # Errors
    ///
    /// Returns [`SelfTestError`] describing the first failing direction.
    pub fn check(&self, manager: &AesGcmKeyManager) -> Result<(), SelfTestError> {
        let v = self.decode()?;
        let crypto_err = |e: CryptoError| SelfTestError::Crypto {
            vector: self.name,
            source: e,
        };

        let aead = manager
            .get_primitive(KeyRecord::from_slice(&v.key))
            .map_err(|e| crypto_err(e.into()))?;
        let opened = aead
            .decrypt(&v.sealed, &v.aad)
            .map_err(|e| crypto_err(e.into()))?;
        if opened != v.plaintext {
            return Err(SelfTestError::Mismatch {
                vector: self.name,
                direction: "decrypt",
            });
        }

        let pinned = AesGcmAead::bind_with_random_source(
            KeyRecord::from(v.key),
            Arc::new(PinnedNonce(v.iv)),
        )
        .map_err(|e| crypto_err(e.into()))?;
        let sealed = pinned
            .encrypt(&v.plaintext, &v.aad)
            .map_err(|e| crypto_err(e.into()))?;
        if sealed != v.sealed {
            return Err(SelfTestError::Mismatch {
                vector: self.name,
                direction: "encrypt",
            });
        }

        debug!(vector = self.name, "known-answer vector passed");
        Ok(())
    }
}

/// Run every entry of [`NIST_VECTORS`] against `manager`.
///
/// Returns the number of vectors checked.
///
/// # Errors
///
/// Stops at the first failing vector.
pub fn run_known_answer_tests(manager: &AesGcmKeyManager) -> Result<usize, SelfTestError> {
    for vector in NIST_VECTORS {
        vector.check(manager)?;
    }
    info!(vectors = NIST_VECTORS.len(), "AES-GCM known-answer tests passed");
    Ok(NIST_VECTORS.len())
}
