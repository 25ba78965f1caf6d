//! AES-GCM key management and AEAD primitive.
//!
//! Data flow:
//! 1. A [`KeyFormatDescriptor`] is checked by [`KeyFormatValidator`].
//! 2. [`KeyGenerator`] draws fresh key bytes into a [`KeyRecord`].
//! 3. [`AesGcmKeyManager`] binds the record to an [`AesGcmAead`].
//! 4. Callers use [`Aead::encrypt`] / [`Aead::decrypt`].
//!
//! Externally supplied key bytes skip step 2 and are re-validated at step 3.
//!
//! # Security invariants
//!
//! - Only 16- and 32-byte keys are accepted.
//! - Every encryption uses a fresh random 96-bit nonce.
//! - No plaintext is returned when tag verification fails.
//! - Key material is never logged and is zeroized on drop.

pub mod conformance;
pub mod crypto;
pub mod key;
pub mod manager;
pub mod selftest;

pub use common::{AeadError, CryptoError, KeyFormatDescriptor, KeyFormatError};
pub use crypto::{Aead, AesGcmAead, OsRandom, SecureRandom};
pub use key::{KeyFormatValidator, KeyGenerator, KeyRecord};
pub use manager::{AesGcmKeyManager, KeyFactory, PrimitiveFactory, KEY_TYPE};
