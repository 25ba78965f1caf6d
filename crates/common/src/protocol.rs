//! Data types exchanged with collaborators outside the key manager.
//!
//! These are serialised as JSON by configuration/templating layers and by the
//! self-test binary's report.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Key format
// ---------------------------------------------------------------------------

/// A request to create a key of a given size.
///
/// Carries no validation of its own; see the key manager's format validator.
/// Negative sizes are unrepresentable and fail at deserialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyFormatDescriptor {
    /// Requested key length in bytes.
    pub key_size_bytes: u32,
}

impl KeyFormatDescriptor {
    /// Construct a descriptor for an arbitrary (not yet validated) size.
    pub const fn new(key_size_bytes: u32) -> Self {
        Self { key_size_bytes }
    }

    /// AES-128-GCM.
    pub const fn aes128() -> Self {
        Self::new(16)
    }

    /// AES-256-GCM.
    pub const fn aes256() -> Self {
        Self::new(32)
    }
}

// ---------------------------------------------------------------------------
// Self-test report
// ---------------------------------------------------------------------------

/// Summary printed by the `aead-selftest` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfTestReport {
    /// `"ok"` or `"failed"`.
    pub status: String,
    /// Number of NIST known-answer vectors checked.
    pub known_answer_vectors: usize,
    /// Key size used for the round-trip rounds.
    pub key_size_bytes: u32,
    /// Number of generate/encrypt/decrypt/tamper rounds completed.
    pub rounds_completed: u32,
    /// Failure description, if any. Never contains key material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_json_shape() {
        let json = serde_json::to_string(&KeyFormatDescriptor::aes256()).unwrap();
        assert_eq!(json, r#"{"key_size_bytes":32}"#);
        let decoded: KeyFormatDescriptor = serde_json::from_str(r#"{"key_size_bytes":16}"#).unwrap();
        assert_eq!(decoded, KeyFormatDescriptor::aes128());
    }

    #[test]
    fn negative_size_rejected_at_parse() {
        let res: Result<KeyFormatDescriptor, _> = serde_json::from_str(r#"{"key_size_bytes":-1}"#);
        assert!(res.is_err());
    }

    #[test]
    fn report_omits_absent_failure() {
        let r = SelfTestReport {
            status: "ok".into(),
            known_answer_vectors: 8,
            key_size_bytes: 32,
            rounds_completed: 16,
            failure: None,
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("failure"));
        let decoded: SelfTestReport = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, r);
    }
}
