//! Cuckoo-cycle scale resolution and rate conversions
//!
//! Cuckoo-cycle difficulty is normalized by a graph weight ("scale") that
//! depends on the algorithm, the graph size in edge bits, the main chain
//! height and the network configuration. With a scale in hand:
//!
//! - `target = scale * 2^256 / difficulty`
//! - `difficulty = gps * block_time`

use crate::core::compact::{compact_to_big, target_to_compact};
use crate::core::constants::HASH_SIZE;
use crate::core::pow_type::{BlockTime, PowType};
use crate::core::target::{hash_to_big, max_target, signed_target_to_hex, target_to_hex};
use crate::params::{EdgeBitsRange, Network, PowConfig};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Float, ToPrimitive};
use serde::Serialize;
use std::fmt;

/// Graph weight of one cuckoo-cycle algorithm
pub trait GraphWeight {
    /// Algorithm this weight belongs to
    fn pow_type(&self) -> PowType;

    /// Scale for a graph of `edge_bits` at `main_height` under `config`
    fn graph_weight(&self, edge_bits: u8, main_height: u64, config: &PowConfig) -> u64;
}

/// Cuckaroo graph weight
#[derive(Debug, Clone, Copy, Default)]
pub struct Cuckaroo;

/// Cuckaroom graph weight
#[derive(Debug, Clone, Copy, Default)]
pub struct Cuckaroom;

/// Cuckatoo graph weight
#[derive(Debug, Clone, Copy, Default)]
pub struct Cuckatoo;

impl GraphWeight for Cuckaroo {
    fn pow_type(&self) -> PowType {
        PowType::Cuckaroo
    }

    fn graph_weight(&self, edge_bits: u8, _main_height: u64, config: &PowConfig) -> u64 {
        let range = config.cuckaroo;
        let edge_bits = clamp_edge_bits(self.pow_type(), range, edge_bits);
        size_weight(edge_bits, range.min).saturating_mul(u64::from(edge_bits))
    }
}

impl GraphWeight for Cuckaroom {
    fn pow_type(&self) -> PowType {
        PowType::Cuckaroom
    }

    fn graph_weight(&self, edge_bits: u8, _main_height: u64, config: &PowConfig) -> u64 {
        let range = config.cuckaroom;
        let edge_bits = clamp_edge_bits(self.pow_type(), range, edge_bits);
        size_weight(edge_bits, range.min).saturating_mul(u64::from(edge_bits))
    }
}

impl GraphWeight for Cuckatoo {
    fn pow_type(&self) -> PowType {
        PowType::Cuckatoo
    }

    fn graph_weight(&self, edge_bits: u8, _main_height: u64, config: &PowConfig) -> u64 {
        // Weighed against the cuckaroo graph sizes
        let range = config.cuckaroo;
        let edge_bits = clamp_edge_bits(self.pow_type(), range, edge_bits);
        size_weight(edge_bits, range.min).saturating_mul(u64::from(edge_bits))
    }
}

/// `2 << (edge_bits - min)`: each extra edge bit doubles the graph
fn size_weight(edge_bits: u8, min: u8) -> u64 {
    2u64.checked_shl(u32::from(edge_bits.saturating_sub(min)))
        .unwrap_or(u64::MAX)
}

fn clamp_edge_bits(pow_type: PowType, range: EdgeBitsRange, edge_bits: u8) -> u8 {
    if !range.contains(edge_bits) {
        tracing::warn!(
            algorithm = %pow_type,
            edge_bits,
            min = range.min,
            max = range.max,
            "Edge bits outside the configured range, clamping"
        );
    }
    range.clamp(edge_bits)
}

/// Graph weight implementation for a proof-of-work variant
///
/// Returns `None` for the hash-based variant, which has no scale.
pub fn algorithm(pow_type: PowType) -> Option<&'static dyn GraphWeight> {
    match pow_type {
        PowType::Blake2bd => None,
        PowType::Cuckaroo => Some(&Cuckaroo),
        PowType::Cuckaroom => Some(&Cuckaroom),
        PowType::Cuckatoo => Some(&Cuckatoo),
    }
}

/// Scale of a cuckoo-cycle variant
///
/// Returns `None` for the hash-based variant.
pub fn graph_weight(
    pow_type: PowType,
    config: &PowConfig,
    edge_bits: u8,
    main_height: u64,
) -> Option<u64> {
    algorithm(pow_type).map(|algo| algo.graph_weight(edge_bits, main_height, config))
}

/// Scale for an algorithm given by name on a network
///
/// An unknown (or hash-based) algorithm name resolves to a zero scale, which
/// flows through the converters as a degenerate result.
pub fn resolve_scale(algorithm_name: &str, network: Network, edge_bits: u8, main_height: u64) -> u64 {
    let Some(pow_type) = PowType::cuckoo_from_name(algorithm_name) else {
        tracing::warn!(algorithm = %algorithm_name, "Unknown cuckoo algorithm, scale is zero");
        return 0;
    };

    let scale = graph_weight(pow_type, &network.params().pow_config, edge_bits, main_height)
        .unwrap_or(0);
    tracing::debug!(
        algorithm = %pow_type,
        %network,
        edge_bits,
        main_height,
        scale,
        "Resolved graph weight"
    );
    scale
}

/// `scale * 2^256 / difficulty`, exact for the binary value of the float
///
/// The caller guarantees `difficulty` is finite and positive.
fn scaled_target(scale: u64, difficulty: f64) -> BigUint {
    let (mantissa, exponent, _) = difficulty.integer_decode();
    let mut numerator = BigUint::from(scale) << 256u32;
    let mut denominator = BigUint::from(mantissa);

    if exponent >= 0 {
        denominator <<= exponent as u32;
    } else {
        numerator <<= exponent.unsigned_abs() as u32;
    }

    numerator / denominator
}

/// Convert graphs per second into a compact target
///
/// A per-block difficulty that does not exceed the scale maps to the maximum
/// target. Negative or non-finite rates are treated the same way.
pub fn gps_to_compact(gps: f64, block_time: BlockTime, scale: u64) -> u32 {
    let difficulty = gps * block_time.as_secs() as f64;

    let target = if !difficulty.is_finite() || difficulty <= scale as f64 {
        tracing::debug!(difficulty, scale, "Difficulty within scale, using maximum target");
        max_target().clone()
    } else {
        scaled_target(scale, difficulty)
    };

    target_to_compact(&target)
}

/// Difficulty implied by a compact target, as a float
fn implied_difficulty(compact: u32, scale: u64) -> f64 {
    let target = compact_to_big(compact);
    if target.sign() != Sign::Plus {
        tracing::debug!(compact, "Non-positive target, using maximum difficulty");
        return max_target().to_f64().unwrap_or(f64::MAX);
    }

    let target = target.magnitude().to_f64().unwrap_or(f64::INFINITY);
    scale as f64 * 2f64.powi(256) / target
}

/// Convert a compact target into graphs per second
pub fn compact_to_gps(compact: u32, block_time: BlockTime, scale: u64) -> f64 {
    implied_difficulty(compact, scale) / block_time.as_secs() as f64
}

/// Target for a cuckoo difficulty
///
/// When the scale is at least the difficulty every solution succeeds, so the
/// target is the maximum 256-bit value.
pub fn diff_to_target(scale: u64, diff: &BigInt) -> BigUint {
    if BigInt::from(scale) >= *diff {
        return max_target().clone();
    }
    (BigUint::from(scale) << 256u32) / diff.magnitude()
}

/// [`diff_to_target`] rendered as 64 hex digits
pub fn diff_to_target_hex(scale: u64, diff: &BigInt) -> String {
    target_to_hex(&diff_to_target(scale, diff))
}

/// Cuckoo difficulty for a target
///
/// Non-positive targets, and targets not above the scale, map to the maximum
/// 256-bit value.
pub fn target_to_diff(scale: u64, target: &BigInt) -> BigUint {
    if target.sign() != Sign::Plus || BigInt::from(scale) >= *target {
        return max_target().clone();
    }
    (BigUint::from(scale) << 256u32) / target.magnitude()
}

/// Cuckoo difficulty reached by a block hash
pub fn cuckoo_diff_from_hash(scale: u64, hash: &[u8; HASH_SIZE]) -> BigUint {
    target_to_diff(scale, &BigInt::from(hash_to_big(hash)))
}

/// Breakdown of a compact-to-GPS conversion
#[derive(Debug, Clone, Serialize)]
pub struct GpsReport {
    /// Input compact value
    pub compact: u32,
    /// Decoded target, 64 hex digits
    pub target: String,
    /// Graph weight used
    pub scale: u64,
    /// Difficulty implied by target and scale
    pub difficulty: f64,
    /// Block time in seconds
    pub block_time: u64,
    /// Graphs per second
    pub gps: f64,
}

impl GpsReport {
    /// Convert a compact target and keep the intermediate values
    pub fn from_compact(compact: u32, block_time: BlockTime, scale: u64) -> Self {
        Self {
            compact,
            target: signed_target_to_hex(&compact_to_big(compact)),
            scale,
            difficulty: implied_difficulty(compact, scale),
            block_time: block_time.as_secs(),
            gps: compact_to_gps(compact, block_time, scale),
        }
    }
}

impl fmt::Display for GpsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "compact    : {:#010x} ({})", self.compact, self.compact)?;
        writeln!(f, "target     : {}", self.target)?;
        writeln!(f, "scale      : {}", self.scale)?;
        writeln!(f, "difficulty : {}", self.difficulty)?;
        writeln!(f, "block time : {}s", self.block_time)?;
        write!(f, "gps        : {}", self.gps)
    }
}
