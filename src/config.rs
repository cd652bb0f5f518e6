//! Configuration management for the difficulty toolkit
//!
//! Options come from the command line, from environment variables for the
//! global flags, and from an optional TOML file that supplies defaults for
//! everything the command line leaves out.

use crate::core::BlockTime;
use crate::error::{Error, Result};
use crate::params::Network;
use crate::utils::HashUnit;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Everything
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Log output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Plain,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Plain => f.write_str("plain"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "powdiff",
    version = env!("CARGO_PKG_VERSION"),
    about = "Proof-of-work difficulty conversions",
    long_about = "Convert between compact difficulty bits, 256-bit targets, hash rates and cuckoo-cycle graphs per second"
)]
pub struct Args {
    /// Configuration file (TOML) supplying default option values
    #[arg(short = 'c', long, global = true, value_name = "FILE", env = "POWDIFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long, global = true, value_enum, env = "POWDIFF_LOG")]
    pub log_level: Option<LogLevel>,

    /// Log format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Conversion to run
    #[command(subcommand)]
    pub command: Command,
}

/// Options that select a cuckoo-cycle graph weight
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaleArgs {
    /// Edge bits (graph size)
    #[arg(short = 'e', long)]
    pub edge_bits: Option<u8>,

    /// Main chain height
    #[arg(short = 'm', long)]
    pub main_height: Option<u64>,

    /// Network (mainnet, testnet, privnet, mixnet)
    #[arg(short = 'n', long)]
    pub network: Option<String>,

    /// Cuckoo algorithm (cuckaroo, cuckaroom, cuckatoo)
    #[arg(short = 'a', long)]
    pub algorithm: Option<String>,
}

/// Conversions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Convert a compact value to a 256-bit target
    CompactToTarget {
        /// Proof-of-work type (hash, cuckoo24, cuckoo29, ...)
        #[arg(long = "pow", default_value = "hash")]
        pow: String,

        #[command(flatten)]
        scale: ScaleArgs,

        /// Compact value, decimal or hex (read from stdin when omitted)
        input: Option<String>,
    },

    /// Convert a 256-bit hex target to a compact value
    TargetToCompact {
        /// Proof-of-work type (hash, cuckoo24, cuckoo29, ...)
        #[arg(long = "pow", default_value = "hash")]
        pow: String,

        #[command(flatten)]
        scale: ScaleArgs,

        /// Target in hex (read from stdin when omitted)
        input: Option<String>,
    },

    /// Convert a cuckoo compact value to graphs per second
    CompactToGps {
        #[command(flatten)]
        scale: ScaleArgs,

        /// Block time in seconds
        #[arg(short = 't', long)]
        block_time: Option<u64>,

        /// Print the intermediate values
        #[arg(short = 'p', long)]
        detail: bool,

        /// Compact value, decimal or hex (read from stdin when omitted)
        input: Option<String>,
    },

    /// Convert graphs per second to a cuckoo compact value
    GpsToCompact {
        #[command(flatten)]
        scale: ScaleArgs,

        /// Block time in seconds
        #[arg(short = 't', long)]
        block_time: Option<u64>,

        /// Graphs per second (read from stdin when omitted)
        input: Option<String>,
    },

    /// Convert an integral hash rate in hash/s to a compact value
    HashrateToCompact {
        /// Block time in seconds
        #[arg(short = 't', long)]
        block_time: Option<u64>,

        /// Hash rate in hash/s (read from stdin when omitted)
        input: Option<String>,
    },

    /// Convert a compact value to a hash rate
    CompactToHashrate {
        /// Unit (H, K, M, G, T, P)
        #[arg(short = 'u', long)]
        unit: Option<String>,

        /// Block time in seconds
        #[arg(short = 't', long)]
        block_time: Option<u64>,

        /// Print the intermediate values
        #[arg(short = 'p', long)]
        detail: bool,

        /// Compact value, decimal or hex (read from stdin when omitted)
        input: Option<String>,
    },
}

impl Command {
    /// Whether the detail mode was requested
    pub fn detail(&self) -> bool {
        match self {
            Command::CompactToGps { detail, .. } | Command::CompactToHashrate { detail, .. } => {
                *detail
            }
            _ => false,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default option values
    pub defaults: DefaultsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Default values for command options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Network name
    pub network: String,

    /// Cuckoo algorithm name
    pub algorithm: String,

    /// Edge bits
    pub edge_bits: u8,

    /// Main chain height
    pub main_height: u64,

    /// Block time of cuckoo-cycle conversions, in seconds
    pub cuckoo_block_time: u64,

    /// Block time of hash rate conversions, in seconds
    pub hash_block_time: u64,

    /// Hash rate display unit
    pub unit: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,

    /// Log format (plain, json)
    pub format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            network: Network::Testnet.name().to_string(),
            algorithm: "cuckaroom".to_string(),
            edge_bits: 29,
            main_height: 1,
            cuckoo_block_time: 43,
            hash_block_time: 100,
            unit: "H".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn.to_string(),
            format: LogFormat::Plain.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration named by the arguments, or the defaults
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(level) = args.log_level {
            config.logging.level = level.to_string();
        }
        if let Some(format) = args.log_format {
            config.logging.format = format.to_string();
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        BlockTime::new(self.defaults.cuckoo_block_time)
            .map_err(|_| Error::config("cuckoo_block_time must be greater than 0"))?;
        BlockTime::new(self.defaults.hash_block_time)
            .map_err(|_| Error::config("hash_block_time must be greater than 0"))?;

        self.defaults
            .unit
            .parse::<HashUnit>()
            .map_err(|e| Error::config(format!("Invalid default unit: {}", e)))?;

        match self.logging.format.as_str() {
            "plain" | "json" => {}
            other => return Err(Error::config(format!("Unknown log format: {}", other))),
        }

        Ok(())
    }
}
