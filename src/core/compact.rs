//! Compact ("bits") encoding of difficulty targets
//!
//! A compact value packs a signed number into 32 bits, much like an IEEE754
//! float with a base-256 exponent:
//!
//! ```text
//! -------------------------------------------------
//! |   Exponent     |    Sign    |    Mantissa     |
//! -------------------------------------------------
//! | 8 bits [31-24] | 1 bit [23] | 23 bits [22-00] |
//! -------------------------------------------------
//! ```
//!
//! `N = (-1^sign) * mantissa * 256^(exponent - 3)`
//!
//! Only 23 bits of precision survive encoding. The truncation is part of the
//! consensus format and must not be "fixed".

use crate::core::constants::{MANTISSA_MASK, SIGN_BIT};
use num_bigint::{BigInt, BigUint, Sign};

/// Largest exponent the 8-bit field can carry
const MAX_EXPONENT: u64 = 0xff;

/// Decode a compact value into a (possibly negative) integer
///
/// A set sign bit yields a negative result. Real difficulty targets never
/// carry it, so callers treat negative values as invalid.
pub fn compact_to_big(compact: u32) -> BigInt {
    let mut mantissa = compact & MANTISSA_MASK;
    let is_negative = compact & SIGN_BIT != 0;
    let exponent = compact >> 24;

    // The exponent counts bytes, so shifting by whole bytes is the same as
    // multiplying by 256^(exponent - 3).
    let magnitude = if exponent <= 3 {
        mantissa >>= 8 * (3 - exponent);
        BigUint::from(mantissa)
    } else {
        BigUint::from(mantissa) << (8 * (exponent - 3))
    };

    let sign = if is_negative { Sign::Minus } else { Sign::Plus };
    BigInt::from_biguint(sign, magnitude)
}

/// Encode an integer into its compact representation
///
/// Zero encodes to zero. Magnitudes too wide for the 8-bit exponent
/// saturate to mantissa `0x7fffff` at exponent `0xff`.
pub fn big_to_compact(n: &BigInt) -> u32 {
    let magnitude = n.magnitude();
    let byte_len = magnitude.bits().div_ceil(8);
    if byte_len == 0 {
        return 0;
    }

    let (mut exponent, mut mantissa) = if byte_len <= 3 {
        let low = magnitude.iter_u32_digits().next().unwrap_or(0);
        (byte_len, low << (8 * (3 - byte_len)))
    } else {
        let shifted = magnitude >> (8 * (byte_len - 3));
        (byte_len, shifted.iter_u32_digits().next().unwrap_or(0))
    };

    // A mantissa with bit 23 set would read back as negative: move one byte
    // into the exponent instead.
    if mantissa & SIGN_BIT != 0 {
        mantissa >>= 8;
        exponent += 1;
    }

    if exponent > MAX_EXPONENT {
        tracing::warn!(
            bytes = byte_len,
            "Value too wide for compact encoding, saturating"
        );
        exponent = MAX_EXPONENT;
        mantissa = MANTISSA_MASK;
    }

    let mut compact = ((exponent as u32) << 24) | mantissa;
    if n.sign() == Sign::Minus {
        compact |= SIGN_BIT;
    }
    compact
}

/// Encode an unsigned target
pub fn target_to_compact(target: &BigUint) -> u32 {
    big_to_compact(&BigInt::from(target.clone()))
}
