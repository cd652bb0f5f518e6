//! Property-based tests for the arithmetic core
//!
//! These tests verify the encoding and conversion invariants using proptest

use super::*;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use proptest::prelude::*;

fn secs(s: u64) -> BlockTime {
    BlockTime::new(s).unwrap()
}

proptest! {
    #[test]
    fn canonical_compact_roundtrip(exponent in 4u32..=32u32, mantissa in 0x01_0000u32..0x80_0000u32) {
        let compact = (exponent << 24) | mantissa;
        prop_assert_eq!(big_to_compact(&compact_to_big(compact)), compact);
    }

    #[test]
    fn small_compact_roundtrip(value in 1u32..0x80_0000u32) {
        // Values below 2^23 survive encoding exactly
        let target = BigInt::from(value);
        prop_assert_eq!(compact_to_big(big_to_compact(&target)), target);
    }

    #[test]
    fn encoding_only_truncates_low_bits(bytes in prop::array::uniform32(any::<u8>())) {
        let target = BigUint::from_bytes_be(&bytes);
        prop_assume!(!target.is_zero());

        let decoded = compact_to_big(big_to_compact(&BigInt::from(target.clone())));
        let decoded = decoded.to_biguint().unwrap();

        // Never rounds up, and never drops more than the bits below the top 23
        prop_assert!(decoded <= target);
        let kept_bits = 16u64.min(target.bits());
        let slack = BigUint::one() << (target.bits() - kept_bits);
        prop_assert!(&target - &decoded < slack);
        // Same byte-length class
        prop_assert!(decoded.bits().div_ceil(8) >= target.bits().div_ceil(8) - 1);
    }

    #[test]
    fn encoded_mantissa_never_sets_sign(bytes in prop::array::uniform32(any::<u8>())) {
        let target = BigInt::from(BigUint::from_bytes_be(&bytes));
        let compact = big_to_compact(&target);
        prop_assert_eq!(compact & constants::SIGN_BIT, 0);
    }

    #[test]
    fn negative_values_keep_their_sign(value in 1i64..0x7f_ffff) {
        let compact = big_to_compact(&BigInt::from(-value));
        prop_assert_ne!(compact & constants::SIGN_BIT, 0);
        prop_assert_eq!(compact_to_big(compact), BigInt::from(-value));
    }

    #[test]
    fn hash_work_decreases_with_target(a in 1u64.., b in 1u64..) {
        prop_assume!(a != b);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        // Use exact small targets so encoding does not merge them
        let low_bits = big_to_compact(&BigInt::from(low));
        let high_bits = big_to_compact(&BigInt::from(high));
        let low_target = compact_to_big(low_bits);
        let high_target = compact_to_big(high_bits);
        prop_assume!(low_target < high_target);

        let low_work = calc_work(low_bits, PowType::Blake2bd);
        let high_work = calc_work(high_bits, PowType::Blake2bd);
        prop_assert!(low_work > high_work);
    }

    #[test]
    fn gps_roundtrip(gps in 2.0f64..1e9, block_time in 1u64..600) {
        let scale = 48;
        prop_assume!(gps * block_time as f64 > scale as f64);
        let compact = gps_to_compact(gps, secs(block_time), scale);
        let back = compact_to_gps(compact, secs(block_time), scale);
        prop_assert!(((back - gps) / gps).abs() < 1e-4, "{} became {}", gps, back);
    }

    #[test]
    fn hashrate_roundtrip(hashrate in 1_000u64..u64::MAX / 1_000, block_time in 1u64..1_000) {
        let compact = hashrate_to_compact(&BigUint::from(hashrate), secs(block_time));
        let report = compact_to_hashrate(compact, crate::utils::HashUnit::H, secs(block_time));
        let relative = (report.hashrate - hashrate as f64).abs() / hashrate as f64;
        prop_assert!(relative < 1e-4, "{} became {}", hashrate, report.hashrate);
    }

    #[test]
    fn diff_and_target_are_inverse(scale in 1u64..1_000_000, diff in 1u64..u64::MAX) {
        prop_assume!(diff > scale);
        let target = diff_to_target(scale, &BigInt::from(diff));
        let back = target_to_diff(scale, &BigInt::from(target));
        // Integer division loses at most a little in each direction
        let diff = BigUint::from(diff);
        prop_assert!(back >= diff);
        prop_assert!(&back - &diff <= &diff / BigUint::from(scale) + 1u32);
    }
}
