//! Proof-of-work variant selection and block time

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Proof-of-work algorithm family used by a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowType {
    /// Hash-based proof of work (double BLAKE2b)
    Blake2bd,
    /// Cuckaroo cuckoo-cycle variant
    Cuckaroo,
    /// Cuckaroom cuckoo-cycle variant
    Cuckaroom,
    /// Cuckatoo cuckoo-cycle variant
    Cuckatoo,
}

impl PowType {
    /// All cuckoo-cycle variants
    pub const CUCKOO: [PowType; 3] = [PowType::Cuckaroo, PowType::Cuckaroom, PowType::Cuckatoo];

    /// Whether this variant is a cuckoo-cycle algorithm
    pub fn is_cuckoo(&self) -> bool {
        !matches!(self, PowType::Blake2bd)
    }

    /// Lower-case algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            PowType::Blake2bd => "blake2bd",
            PowType::Cuckaroo => "cuckaroo",
            PowType::Cuckaroom => "cuckaroom",
            PowType::Cuckatoo => "cuckatoo",
        }
    }

    /// Look up a cuckoo-cycle variant by name
    pub fn cuckoo_from_name(name: &str) -> Option<Self> {
        match name.parse::<PowType>() {
            Ok(pow) if pow.is_cuckoo() => Some(pow),
            _ => None,
        }
    }
}

impl FromStr for PowType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "blake2bd" | "hash" => Ok(PowType::Blake2bd),
            "cuckaroo" => Ok(PowType::Cuckaroo),
            "cuckaroom" => Ok(PowType::Cuckaroom),
            "cuckatoo" => Ok(PowType::Cuckatoo),
            other => Err(Error::invalid_input(format!(
                "Unknown proof-of-work algorithm: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for PowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target interval between blocks, in seconds
///
/// Used as a divisor by the rate converters, so zero is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BlockTime(NonZeroU64);

impl BlockTime {
    /// Create a block time, rejecting zero
    pub fn new(seconds: u64) -> Result<Self> {
        NonZeroU64::new(seconds)
            .map(Self)
            .ok_or_else(|| Error::config("Block time must be greater than 0"))
    }

    /// Block time in seconds
    pub fn as_secs(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for BlockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
