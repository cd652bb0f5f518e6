//! 256-bit target helpers
//!
//! Constants of the 256-bit target space, fixed-width hex rendering and
//! parsing, and the adapter turning a little-endian block hash into an integer.

use crate::core::constants::{HASH_SIZE, TARGET_HEX_DIGITS};
use crate::error::{Error, Result};
use num_bigint::{BigInt, BigUint};
use num_traits::One;
use once_cell::sync::Lazy;

static ONE_LSH_256: Lazy<BigUint> = Lazy::new(|| BigUint::one() << 256u32);

static MAX_TARGET: Lazy<BigUint> = Lazy::new(|| &*ONE_LSH_256 - BigUint::one());

/// `2^256`, the numerator of the work and difficulty formulas
pub fn one_lsh_256() -> &'static BigUint {
    &ONE_LSH_256
}

/// Maximum 256-bit value (`2^256 - 1`), the easiest possible target
pub fn max_target() -> &'static BigUint {
    &MAX_TARGET
}

/// Render a target as hex, zero-padded to 64 digits
///
/// Values wider than 256 bits are rendered in full rather than truncated.
pub fn target_to_hex(target: &BigUint) -> String {
    format!("{:0width$x}", target, width = TARGET_HEX_DIGITS)
}

/// Render a decoded compact value, prefixing `-` when the sign bit was set
pub fn signed_target_to_hex(value: &BigInt) -> String {
    match value.to_biguint() {
        Some(target) => target_to_hex(&target),
        None => format!("-{}", target_to_hex(value.magnitude())),
    }
}

/// Parse a big-endian hex target of at most 64 digits, `0x` prefix optional
pub fn target_from_hex(input: &str) -> Result<BigUint> {
    let digits = input.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);

    if digits.is_empty() {
        return Err(Error::invalid_target("Empty target"));
    }
    if digits.len() > TARGET_HEX_DIGITS {
        return Err(Error::invalid_target(format!(
            "Expected at most {} hex digits, got {}",
            TARGET_HEX_DIGITS,
            digits.len()
        )));
    }

    // hex::decode wants whole bytes
    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };
    let bytes =
        hex::decode(&padded).map_err(|e| Error::invalid_target(format!("Invalid hex: {}", e)))?;

    Ok(BigUint::from_bytes_be(&bytes))
}

/// Convert a block hash into an integer for comparison against a target
///
/// Hashes are stored little-endian, so the bytes are reversed before being
/// read as a big-endian number.
pub fn hash_to_big(hash: &[u8; HASH_SIZE]) -> BigUint {
    BigUint::from_bytes_le(hash)
}
