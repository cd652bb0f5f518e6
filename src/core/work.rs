//! Accumulated work derived from a compact target
//!
//! The canonical chain is the one with the most accumulated work. Since a
//! lower target means more work, the work value is an inverse of the target.

use crate::core::compact::compact_to_big;
use crate::core::constants::CUCKOO_WORK_FACTOR;
use crate::core::pow_type::PowType;
use crate::core::target::one_lsh_256;
use num_bigint::{BigUint, Sign};
use num_traits::{One, Zero};

/// Calculate the work value of a block from its compact difficulty bits
///
/// - hash-based: `2^256 / (target + 1)`; the `+ 1` keeps the denominator
///   non-zero and the result finite for the largest target.
/// - cuckoo-cycle: `(1865 << 64) / target`, the fixed issuance weighting of
///   cuckoo work against hash work.
///
/// Zero or negative targets yield zero work. Valid blocks never produce
/// them, but an invalid block can.
pub fn calc_work(bits: u32, pow_type: PowType) -> BigUint {
    let difficulty_num = compact_to_big(bits);
    if difficulty_num.sign() != Sign::Plus {
        tracing::debug!(bits, "Non-positive target, work is zero");
        return BigUint::zero();
    }
    let target = difficulty_num.magnitude();

    if pow_type.is_cuckoo() {
        let all_diff = BigUint::from(CUCKOO_WORK_FACTOR) << 64u32;
        return all_diff / target;
    }

    one_lsh_256() / (target + BigUint::one())
}
