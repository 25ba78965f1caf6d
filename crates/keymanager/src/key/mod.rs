//! Key lifecycle: format validation, owned key records, and generation.
//!
//! # Security invariants
//!
//! - A valid key is exactly 16 or 32 bytes. 24-byte keys are rejected.
//! - Key bytes are never logged, traced, or printed by `Debug`.
//! - Key buffers are zeroized when dropped.

pub mod format;
pub mod generator;
pub mod record;

pub use format::{validate_key_size, KeyFormatValidator, SUPPORTED_KEY_SIZES};
pub use generator::KeyGenerator;
pub use record::KeyRecord;
