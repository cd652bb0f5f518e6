//! Command-level conversions
//!
//! Each command takes its primary input as a raw string, resolves the network
//! and graph weight it needs from the command options and the configured
//! defaults, and returns an [`Output`] that renders as plain text or JSON.

use crate::config::{Command, Config, DefaultsConfig, ScaleArgs};
use crate::core::compact::{compact_to_big, target_to_compact};
use crate::core::cuckoo::{self, GpsReport};
use crate::core::target::{max_target, target_from_hex, target_to_hex};
use crate::core::{BlockTime, HashrateReport, PowType, hashrate};
use crate::error::{Error, Result};
use crate::params::Network;
use crate::utils::{self, HashUnit};
use num_bigint::{BigInt, Sign};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Proof-of-work selector of the target commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowSelection {
    /// The compact encodes a target directly
    Hash,
    /// The compact encodes a cuckoo difficulty for graphs of this many edge bits
    Cuckoo(u8),
}

impl FromStr for PowSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        if matches!(name.parse::<PowType>(), Ok(PowType::Blake2bd)) {
            return Ok(PowSelection::Hash);
        }

        name.strip_prefix("cuckoo")
            .and_then(|bits| bits.parse::<u8>().ok())
            .map(PowSelection::Cuckoo)
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "Unknown proof-of-work type: {} (expected hash or cuckooNN)",
                    s
                ))
            })
    }
}

impl fmt::Display for PowSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowSelection::Hash => f.write_str("hash"),
            PowSelection::Cuckoo(bits) => write!(f, "cuckoo{}", bits),
        }
    }
}

/// Inputs of the graph-weight lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleSettings {
    /// Network whose proof-of-work configuration applies
    pub network: Network,
    /// Cuckoo algorithm name
    pub algorithm: String,
    /// Graph size
    pub edge_bits: u8,
    /// Main chain height
    pub main_height: u64,
}

impl ScaleSettings {
    /// Merge command options over configured defaults
    pub fn resolve(args: &ScaleArgs, defaults: &DefaultsConfig) -> Self {
        let network = args.network.as_deref().unwrap_or(&defaults.network);
        Self {
            network: Network::from_name(network),
            algorithm: args
                .algorithm
                .clone()
                .unwrap_or_else(|| defaults.algorithm.clone()),
            edge_bits: args.edge_bits.unwrap_or(defaults.edge_bits),
            main_height: args.main_height.unwrap_or(defaults.main_height),
        }
    }

    /// Graph weight for these settings
    pub fn scale(&self) -> u64 {
        cuckoo::resolve_scale(&self.algorithm, self.network, self.edge_bits, self.main_height)
    }

    /// Same settings with the graph size replaced
    pub fn with_edge_bits(&self, edge_bits: u8) -> Self {
        Self {
            edge_bits,
            ..self.clone()
        }
    }
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self::resolve(&ScaleArgs::default(), &DefaultsConfig::default())
    }
}

/// Result of a command
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// A 256-bit target
    Target {
        /// 64 hex digits
        target: String,
    },
    /// A compact value
    Compact {
        /// Compact value
        compact: u32,
    },
    /// A graphs-per-second conversion
    Gps(GpsReport),
    /// A hash rate conversion
    Hashrate(HashrateReport),
}

impl Output {
    /// Render for standard output
    pub fn render(&self, detail: bool, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string_pretty(self)?);
        }

        let text = match self {
            Output::Target { target } => target.clone(),
            Output::Compact { compact } => compact.to_string(),
            Output::Gps(report) if detail => report.to_string(),
            Output::Gps(report) => report.gps.to_string(),
            Output::Hashrate(report) if detail => report.details(),
            Output::Hashrate(report) => report.rate.clone(),
        };
        Ok(text)
    }
}

fn block_time(secs: u64) -> Result<BlockTime> {
    BlockTime::new(secs)
        .map_err(|_| Error::invalid_input("Block time must be greater than 0 seconds"))
}

/// Decode a compact value into a 256-bit target
///
/// With a cuckoo selector the compact encodes a difficulty, which is turned
/// into a target with the graph weight of the selected size.
pub fn compact_to_target(input: &str, pow: PowSelection, settings: &ScaleSettings) -> Result<String> {
    let compact = utils::parse_compact(input)?;
    let value = compact_to_big(compact);

    match pow {
        PowSelection::Hash => {
            if value.sign() == Sign::Minus {
                return Err(Error::invalid_target(format!(
                    "Compact value {:#010x} encodes a negative target",
                    compact
                )));
            }
            if value.magnitude() > max_target() {
                return Err(Error::invalid_target(format!(
                    "Compact value {:#010x} encodes a target wider than 256 bits",
                    compact
                )));
            }
            Ok(target_to_hex(value.magnitude()))
        }
        PowSelection::Cuckoo(edge_bits) => {
            let scale = settings.with_edge_bits(edge_bits).scale();
            Ok(cuckoo::diff_to_target_hex(scale, &value))
        }
    }
}

/// Encode a hex target as a compact value
///
/// With a cuckoo selector the target is first turned into the difficulty it
/// represents for graphs of the selected size.
pub fn target_to_compact_value(input: &str, pow: PowSelection, settings: &ScaleSettings) -> Result<u32> {
    let target = target_from_hex(input)?;

    let compact = match pow {
        PowSelection::Hash => target_to_compact(&target),
        PowSelection::Cuckoo(edge_bits) => {
            let scale = settings.with_edge_bits(edge_bits).scale();
            let diff = cuckoo::target_to_diff(scale, &BigInt::from(target));
            target_to_compact(&diff)
        }
    };
    Ok(compact)
}

/// Convert a cuckoo compact value into graphs per second
pub fn compact_to_gps(input: &str, block_secs: u64, settings: &ScaleSettings) -> Result<GpsReport> {
    let compact = utils::parse_compact(input)?;
    let block_time = block_time(block_secs)?;
    Ok(GpsReport::from_compact(compact, block_time, settings.scale()))
}

/// Convert graphs per second into a cuckoo compact value
pub fn gps_to_compact(input: &str, block_secs: u64, settings: &ScaleSettings) -> Result<u32> {
    let gps = utils::parse_gps(input)?;
    let block_time = block_time(block_secs)?;
    Ok(cuckoo::gps_to_compact(gps, block_time, settings.scale()))
}

/// Convert an integral hash rate into a compact value
pub fn hashrate_to_compact(input: &str, block_secs: u64) -> Result<u32> {
    let rate = utils::parse_hashrate(input)?;
    let block_time = block_time(block_secs)?;
    Ok(hashrate::hashrate_to_compact(&rate, block_time))
}

/// Convert a compact value into a hash rate
pub fn compact_to_hashrate(input: &str, unit: &str, block_secs: u64) -> Result<HashrateReport> {
    let compact = utils::parse_compact(input)?;
    let unit: HashUnit = unit.parse()?;
    let block_time = block_time(block_secs)?;
    Ok(hashrate::compact_to_hashrate(compact, unit, block_time))
}

/// Run a parsed command against the configured defaults
///
/// Missing positional input is read from standard input.
pub fn execute(command: Command, config: &Config) -> Result<Output> {
    let defaults = &config.defaults;
    tracing::debug!(?command, "Executing command");

    let output = match command {
        Command::CompactToTarget { pow, scale, input } => {
            let pow: PowSelection = pow.parse()?;
            let settings = ScaleSettings::resolve(&scale, defaults);
            let input = utils::read_input(input)?;
            Output::Target {
                target: compact_to_target(&input, pow, &settings)?,
            }
        }
        Command::TargetToCompact { pow, scale, input } => {
            let pow: PowSelection = pow.parse()?;
            let settings = ScaleSettings::resolve(&scale, defaults);
            let input = utils::read_input(input)?;
            Output::Compact {
                compact: target_to_compact_value(&input, pow, &settings)?,
            }
        }
        Command::CompactToGps {
            scale,
            block_time,
            input,
            ..
        } => {
            let settings = ScaleSettings::resolve(&scale, defaults);
            let input = utils::read_input(input)?;
            let secs = block_time.unwrap_or(defaults.cuckoo_block_time);
            Output::Gps(compact_to_gps(&input, secs, &settings)?)
        }
        Command::GpsToCompact {
            scale,
            block_time,
            input,
        } => {
            let settings = ScaleSettings::resolve(&scale, defaults);
            let input = utils::read_input(input)?;
            let secs = block_time.unwrap_or(defaults.cuckoo_block_time);
            Output::Compact {
                compact: gps_to_compact(&input, secs, &settings)?,
            }
        }
        Command::HashrateToCompact { block_time, input } => {
            let input = utils::read_input(input)?;
            let secs = block_time.unwrap_or(defaults.hash_block_time);
            Output::Compact {
                compact: hashrate_to_compact(&input, secs)?,
            }
        }
        Command::CompactToHashrate {
            unit,
            block_time,
            input,
            ..
        } => {
            let input = utils::read_input(input)?;
            let unit = unit.as_deref().unwrap_or(&defaults.unit);
            let secs = block_time.unwrap_or(defaults.hash_block_time);
            Output::Hashrate(compact_to_hashrate(&input, unit, secs)?)
        }
    };

    Ok(output)
}
