//! `aead-selftest` — power-on self test for the AES-GCM key manager.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging (stderr).
//! 3. Run the NIST known-answer suite and the randomized rounds.
//! 4. Print the JSON report on stdout; exit non-zero on failure.

mod config;
mod telemetry;

use aesgcm_keymanager::{selftest, AesGcmKeyManager};
use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        key_size = cfg.key_size_bytes,
        rounds = cfg.self_test_rounds,
        "aead-selftest starting"
    );

    // -----------------------------------------------------------------------
    // 3. Self test
    // -----------------------------------------------------------------------
    let manager = AesGcmKeyManager::new();
    let report = selftest::run(&manager, cfg.key_format(), cfg.self_test_rounds);

    // -----------------------------------------------------------------------
    // 4. Report
    // -----------------------------------------------------------------------
    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    println!("{json}");

    if report.status != "ok" {
        anyhow::bail!(
            "self test failed: {}",
            report.failure.as_deref().unwrap_or("unknown failure")
        );
    }
    Ok(())
}
