//! Hash rate unit prefixes
//! Supports the decimal SI prefixes K, M, G, T and P on top of plain hashes.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Display unit of a hash rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum HashUnit {
    /// Hashes per second
    #[default]
    H,
    /// Thousand hashes per second
    K,
    /// Million hashes per second
    M,
    /// Billion hashes per second
    G,
    /// 10^12 hashes per second
    T,
    /// 10^15 hashes per second
    P,
}

impl HashUnit {
    /// Number of hashes per second one unit stands for
    pub fn factor(&self) -> f64 {
        match self {
            HashUnit::H => 1.0,
            HashUnit::K => 1_000.0,
            HashUnit::M => 1_000_000.0,
            HashUnit::G => 1_000_000_000.0,
            HashUnit::T => 1_000_000_000_000.0,
            HashUnit::P => 1_000_000_000_000_000.0,
        }
    }

    /// Rate suffix, e.g. `MH/s`
    pub fn suffix(&self) -> &'static str {
        match self {
            HashUnit::H => "H/s",
            HashUnit::K => "KH/s",
            HashUnit::M => "MH/s",
            HashUnit::G => "GH/s",
            HashUnit::T => "TH/s",
            HashUnit::P => "PH/s",
        }
    }
}

impl FromStr for HashUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "h" => Ok(HashUnit::H),
            "k" => Ok(HashUnit::K),
            "m" => Ok(HashUnit::M),
            "g" => Ok(HashUnit::G),
            "t" => Ok(HashUnit::T),
            "p" => Ok(HashUnit::P),
            _ => Err(Error::invalid_input(format!(
                "Unknown hash rate unit: {} (expected H, K, M, G, T or P)",
                s
            ))),
        }
    }
}

impl fmt::Display for HashUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Format a hash rate given in hashes per second using a fixed unit
pub fn format_hash_rate(hashes_per_sec: f64, unit: HashUnit) -> String {
    format!("{:.3} {}", hashes_per_sec / unit.factor(), unit.suffix())
}
