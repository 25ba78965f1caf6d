//! Error types and collaborator-facing data types shared across the AES-GCM
//! key manager crates.

pub mod error;
pub mod protocol;

pub use error::{AeadError, CryptoError, KeyFormatError};
pub use protocol::{KeyFormatDescriptor, SelfTestReport};
