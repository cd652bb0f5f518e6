//! Proof-of-work difficulty toolkit
//!
//! Conversions between the representations of proof-of-work difficulty:
//! - Compact 32-bit encoding <-> 256-bit targets
//! - Accumulated work for hash-based and cuckoo-cycle proof of work
//! - Cuckoo-cycle graph weights per algorithm, graph size and network
//! - Graphs per second <-> compact, for cuckoo-cycle mining
//! - Hash rate <-> compact, for hash-based mining

#![warn(missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod params;
pub mod utils;

pub use config::Config;
pub use error::{Error, Result};
pub use params::Network;

/// Application name
pub const APP_NAME: &str = "powdiff";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::commands::{Output, PowSelection, ScaleSettings};
    pub use crate::core::{
        BlockTime, GraphWeight, PowType, big_to_compact, calc_work, compact_to_big,
        compact_to_gps, compact_to_hashrate, diff_to_target, gps_to_compact,
        hashrate_to_compact, resolve_scale, target_to_diff,
    };
    pub use crate::error::{Error, Result};
    pub use crate::params::Network;
    pub use crate::utils::HashUnit;
}
