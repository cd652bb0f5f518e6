//! Utility functions and helpers

pub mod units;

use crate::error::{Error, Result};
use num_bigint::BigUint;
use std::io::{IsTerminal, Read};
use tracing_subscriber::EnvFilter;

pub use units::{HashUnit, format_hash_rate};

/// Initialize logging based on configuration
///
/// Logs go to stderr so that stdout carries only command output. Fails when
/// a global subscriber is already installed.
pub fn init_logging(level: &str, format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = match format {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))
}

/// Resolve the primary input of a command
///
/// A positional argument wins; otherwise standard input is read when it is
/// not a terminal.
pub fn read_input(positional: Option<String>) -> Result<String> {
    if let Some(value) = positional {
        return Ok(value.trim().to_string());
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(Error::invalid_input(
            "Missing input: pass it as an argument or pipe it on stdin",
        ));
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input("Empty input on stdin"));
    }
    Ok(trimmed.to_string())
}

/// Parse a compact value given in decimal or hex
///
/// `0x`-prefixed input is hex. Unprefixed input is decimal when it parses as
/// one, and hex otherwise (`1d00ffff`).
pub fn parse_compact(input: &str) -> Result<u32> {
    let input = input.trim();
    let invalid = || Error::invalid_input(format!("Invalid compact value: {}", input));

    if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        return u32::from_str_radix(hex, 16).map_err(|_| invalid());
    }

    input
        .parse::<u32>()
        .or_else(|_| u32::from_str_radix(input, 16))
        .map_err(|_| invalid())
}

/// Parse an integral hash rate in hashes per second
///
/// Fractions, signs and unit suffixes are rejected rather than rounded.
pub fn parse_hashrate(input: &str) -> Result<BigUint> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_input(format!(
            "Hash rate must be a non-negative integer in hash/s, got: {}",
            input
        )));
    }

    BigUint::parse_bytes(input.as_bytes(), 10)
        .ok_or_else(|| Error::invalid_input(format!("Invalid hash rate: {}", input)))
}

/// Parse a graphs-per-second figure
pub fn parse_gps(input: &str) -> Result<f64> {
    let input = input.trim();
    let gps: f64 = input
        .parse()
        .map_err(|_| Error::invalid_input(format!("Invalid GPS value: {}", input)))?;

    if !gps.is_finite() || gps < 0.0 {
        return Err(Error::invalid_input(format!(
            "GPS must be a finite non-negative number, got: {}",
            input
        )));
    }
    Ok(gps)
}
