//! Configuration loading and validation for the self-test binary.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if any variable is invalid.

use aesgcm_keymanager::{KeyFormatDescriptor, KeyFormatValidator};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated self-test configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Key size used for randomized rounds. Must be 16 or 32.
    #[serde(default = "default_key_size_bytes")]
    pub key_size_bytes: u32,

    /// Number of randomized generate/encrypt/decrypt/tamper rounds.
    #[serde(default = "default_self_test_rounds")]
    pub self_test_rounds: u32,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_key_size_bytes() -> u32 {
    32
}
fn default_self_test_rounds() -> u32 {
    16
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Key format requested for the randomized rounds.
    pub fn key_format(&self) -> KeyFormatDescriptor {
        KeyFormatDescriptor::new(self.key_size_bytes)
    }

    fn validate(&self) -> Result<()> {
        KeyFormatValidator
            .validate(&self.key_format())
            .context("KEY_SIZE_BYTES must be 16 or 32")?;
        if self.self_test_rounds == 0 {
            anyhow::bail!("SELF_TEST_ROUNDS must be > 0");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            log_level: default_log_level(),
            key_size_bytes: default_key_size_bytes(),
            self_test_rounds: default_self_test_rounds(),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_key_size_bytes(), 32);
        assert_eq!(default_self_test_rounds(), 16);
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(valid().validate().is_ok());
        let aes128 = Config {
            key_size_bytes: 16,
            ..valid()
        };
        assert!(aes128.validate().is_ok());
    }

    #[test]
    fn validate_rejects_aes192() {
        let cfg = Config {
            key_size_bytes: 24,
            ..valid()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("KEY_SIZE_BYTES"));
    }

    #[test]
    fn validate_rejects_zero_rounds() {
        let cfg = Config {
            self_test_rounds: 0,
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_log_level() {
        let cfg = Config {
            log_level: "  ".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }
}
