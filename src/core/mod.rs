//! Arithmetic core: compact encoding, targets, work and rate conversions
//!
//! Every function in this module is a pure function of its arguments plus the
//! read-only network tables in [`crate::params`]. Nothing here allocates
//! shared state, so conversions can run concurrently without locking.

pub mod compact;
pub mod cuckoo;
pub mod hashrate;
mod pow_type;
pub mod target;
pub mod work;

pub use compact::{big_to_compact, compact_to_big};
pub use cuckoo::{
    Cuckaroo, Cuckaroom, Cuckatoo, GraphWeight, compact_to_gps, cuckoo_diff_from_hash,
    diff_to_target, diff_to_target_hex, gps_to_compact, graph_weight, resolve_scale,
    target_to_diff,
};
pub use hashrate::{HashrateReport, compact_to_hashrate, hashrate_to_compact};
pub use pow_type::{BlockTime, PowType};
pub use target::{hash_to_big, max_target, one_lsh_256, target_to_hex};
pub use work::calc_work;

/// Constants for the compact encoding
pub mod constants {
    /// Mask of the 23-bit mantissa
    pub const MANTISSA_MASK: u32 = 0x007f_ffff;

    /// Sign bit of a compact value
    pub const SIGN_BIT: u32 = 0x0080_0000;

    /// Size of a block hash in bytes
    pub const HASH_SIZE: usize = 32;

    /// Number of hex digits in a rendered 256-bit target
    pub const TARGET_HEX_DIGITS: usize = 64;

    /// Numerator multiplier of the cuckoo-cycle work formula
    pub const CUCKOO_WORK_FACTOR: u64 = 1865;
}


#[cfg(test)]
mod tests_property_simple;
