//! Power-on self test: known answers followed by randomized round trips.

use thiserror::Error;
use tracing::{error, info};

use crate::conformance::run_known_answer_tests;
use crate::crypto::random::{OsRandom, SecureRandom};
use crate::crypto::{wire, Aead};
use crate::manager::{AesGcmKeyManager, KeyFactory, PrimitiveFactory};
use common::{AeadError, CryptoError, KeyFormatDescriptor, SelfTestReport};

/// Largest plaintext used by a round.
const MAX_PLAINTEXT_LEN: usize = 1024;

/// A randomized round failed.
#[derive(Debug, Error)]
pub enum RoundError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("ciphertext length {actual} != {expected}")]
    LengthLaw { expected: usize, actual: usize },

    #[error("decrypted plaintext differs from the original")]
    PlaintextMismatch,

    #[error("tampered ciphertext was not rejected")]
    TamperUndetected,
}

impl From<AeadError> for RoundError {
    fn from(e: AeadError) -> Self {
        RoundError::Crypto(e.into())
    }
}

impl From<common::KeyFormatError> for RoundError {
    fn from(e: common::KeyFormatError) -> Self {
        RoundError::Crypto(e.into())
    }
}

/// Generate a key, encrypt random data, check the length law, decrypt,
/// then flip one bit and require an authentication failure.
///
/// # Errors
///
/// Returns the first property that does not hold.
pub fn round_trip(
    manager: &AesGcmKeyManager,
    descriptor: &KeyFormatDescriptor,
    round: u32,
) -> Result<(), RoundError> {
    let key = manager.create_key(descriptor)?;
    let aead = manager.get_primitive(key)?;

    let len = (round as usize * 37) % (MAX_PLAINTEXT_LEN + 1);
    let mut plaintext = vec![0u8; len];
    let mut associated_data = [0u8; 16];
    OsRandom
        .fill(&mut plaintext)
        .and_then(|_| OsRandom.fill(&mut associated_data))
        .map_err(|e| AeadError::EntropyUnavailable(e.0))?;

    let ciphertext = aead.encrypt(&plaintext, &associated_data)?;
    let expected = wire::ciphertext_len(plaintext.len());
    if ciphertext.len() != expected {
        return Err(RoundError::LengthLaw {
            expected,
            actual: ciphertext.len(),
        });
    }

    if aead.decrypt(&ciphertext, &associated_data)? != plaintext {
        return Err(RoundError::PlaintextMismatch);
    }

    let mut tampered = ciphertext;
    let bit = round as usize % (tampered.len() * 8);
    tampered[bit / 8] ^= 1 << (bit % 8);
    match aead.decrypt(&tampered, &associated_data) {
        Err(AeadError::AuthenticationFailed) => Ok(()),
        Err(e) => Err(e.into()),
        Ok(_) => Err(RoundError::TamperUndetected),
    }
}

fn failed(mut report: SelfTestReport, reason: String) -> SelfTestReport {
    report.status = "failed".into();
    report.failure = Some(reason);
    report
}

/// Run the known-answer suite, then `rounds` randomized rounds with keys of
/// `descriptor`'s size. Always returns a report; check `status`.
pub fn run(
    manager: &AesGcmKeyManager,
    descriptor: KeyFormatDescriptor,
    rounds: u32,
) -> SelfTestReport {
    let mut report = SelfTestReport {
        status: "ok".into(),
        known_answer_vectors: 0,
        key_size_bytes: descriptor.key_size_bytes,
        rounds_completed: 0,
        failure: None,
    };

    match run_known_answer_tests(manager) {
        Ok(n) => report.known_answer_vectors = n,
        Err(e) => {
            error!(error = %e, "known-answer test failed");
            return failed(report, e.to_string());
        }
    }

    for round in 0..rounds {
        if let Err(e) = round_trip(manager, &descriptor, round) {
            error!(round, error = %e, "self-test round failed");
            return failed(report, format!("round {round}: {e}"));
        }
        report.rounds_completed += 1;
    }

    info!(
        key_size = descriptor.key_size_bytes,
        rounds = report.rounds_completed,
        "self test passed"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::random::{EntropyError, MockSecureRandom};
    use std::sync::Arc;

    #[test]
    fn passes_with_os_random() {
        let report = run(&AesGcmKeyManager::new(), KeyFormatDescriptor::aes256(), 8);
        assert_eq!(report.status, "ok");
        assert_eq!(report.known_answer_vectors, 8);
        assert_eq!(report.rounds_completed, 8);
        assert!(report.failure.is_none());
    }

    #[test]
    fn round_trip_aes128() {
        let m = AesGcmKeyManager::new();
        for round in 0..4 {
            round_trip(&m, &KeyFormatDescriptor::aes128(), round).unwrap();
        }
    }

    #[test]
    fn unsupported_size_fails_first_round() {
        let report = run(&AesGcmKeyManager::new(), KeyFormatDescriptor::new(24), 3);
        assert_eq!(report.status, "failed");
        assert_eq!(report.known_answer_vectors, 8);
        assert_eq!(report.rounds_completed, 0);
        assert!(report.failure.unwrap().contains("round 0"));
    }

    #[test]
    fn broken_entropy_fails_rounds_not_known_answers() {
        let mut rng = MockSecureRandom::new();
        rng.expect_fill()
            .returning(|_| Err(EntropyError("starved".into())));
        let m = AesGcmKeyManager::with_random_source(Arc::new(rng));
        let report = run(&m, KeyFormatDescriptor::aes128(), 2);
        assert_eq!(report.status, "failed");
        assert_eq!(report.known_answer_vectors, 8);
        assert!(report.failure.unwrap().contains("starved"));
    }
}
