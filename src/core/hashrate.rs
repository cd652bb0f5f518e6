//! Hash rate conversions for hash-based proof of work
//!
//! The expected number of hashes needed to solve a block is its work,
//! `2^256 / (target + 1)`. Spread over the block time that gives a hash rate,
//! and inverting it turns a hash rate back into a target.

use crate::core::compact::{compact_to_big, target_to_compact};
use crate::core::pow_type::{BlockTime, PowType};
use crate::core::target::{max_target, one_lsh_256, signed_target_to_hex};
use crate::core::work::calc_work;
use crate::utils::units::{HashUnit, format_hash_rate};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::Serialize;
use std::fmt;

/// Convert an integral hash rate (hashes per second) into a compact target
///
/// `target = 2^256 / (hashrate * block_time) - 1`. A zero rate maps to the
/// maximum target, whose work is one hash per block, so it reads back as
/// `1 / block_time` hash/s rather than zero.
pub fn hashrate_to_compact(hashrate: &BigUint, block_time: BlockTime) -> u32 {
    let difficulty = hashrate * block_time.as_secs();

    let target = if difficulty.is_zero() {
        tracing::debug!("Zero difficulty, using maximum target");
        max_target().clone()
    } else {
        let quotient = one_lsh_256() / &difficulty;
        if quotient.is_zero() {
            quotient
        } else {
            quotient - 1u32
        }
    };

    target_to_compact(&target)
}

/// Convert a compact target into a hash rate report
pub fn compact_to_hashrate(compact: u32, unit: HashUnit, block_time: BlockTime) -> HashrateReport {
    let difficulty = calc_work(compact, PowType::Blake2bd);
    let hashes_per_sec =
        difficulty.to_f64().unwrap_or(f64::INFINITY) / block_time.as_secs() as f64;

    HashrateReport {
        compact,
        target: signed_target_to_hex(&compact_to_big(compact)),
        difficulty: difficulty.to_string(),
        block_time: block_time.as_secs(),
        unit,
        hashrate: hashes_per_sec / unit.factor(),
        rate: format_hash_rate(hashes_per_sec, unit),
    }
}

/// Result of a compact-to-hashrate conversion
#[derive(Debug, Clone, Serialize)]
pub struct HashrateReport {
    /// Input compact value
    pub compact: u32,
    /// Decoded target, 64 hex digits
    pub target: String,
    /// Expected hashes per block, in decimal
    pub difficulty: String,
    /// Block time in seconds
    pub block_time: u64,
    /// Display unit
    pub unit: HashUnit,
    /// Hash rate expressed in `unit`
    pub hashrate: f64,
    /// Formatted rate, e.g. `1.000 MH/s`
    pub rate: String,
}

impl HashrateReport {
    /// Multi-line breakdown including the intermediate difficulty
    pub fn details(&self) -> String {
        format!(
            "compact    : {:#010x} ({})\ntarget     : {}\ndifficulty : {}\nblock time : {}s\nhashrate   : {}",
            self.compact, self.compact, self.target, self.difficulty, self.block_time, self.rate
        )
    }
}

impl fmt::Display for HashrateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rate)
    }
}
