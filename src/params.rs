//! Network proof-of-work parameters
//!
//! Each network carries a read-only [`PowConfig`] describing the valid graph
//! sizes of the cuckoo-cycle algorithms. The tables are built once on first
//! use and never mutated afterwards.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Known networks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network
    Mainnet,
    /// Public test network
    #[default]
    Testnet,
    /// Local private network
    Privnet,
    /// Mixed-algorithm test network
    Mixnet,
}

impl Network {
    /// Resolve a network by name
    ///
    /// Unknown names fall back to [`Network::Testnet`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "mainnet" => Network::Mainnet,
            "testnet" => Network::Testnet,
            "privnet" => Network::Privnet,
            "mixnet" => Network::Mixnet,
            other => {
                tracing::warn!(network = %other, "Unknown network, falling back to testnet");
                Network::Testnet
            }
        }
    }

    /// Lower-case network name
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Privnet => "privnet",
            Network::Mixnet => "mixnet",
        }
    }

    /// Parameters of this network
    pub fn params(&self) -> &'static NetworkParams {
        match self {
            Network::Mainnet => &MAINNET_PARAMS,
            Network::Testnet => &TESTNET_PARAMS,
            Network::Privnet => &PRIVNET_PARAMS,
            Network::Mixnet => &MIXNET_PARAMS,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive range of valid edge bits for one algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeBitsRange {
    /// Smallest supported graph size
    pub min: u8,
    /// Largest supported graph size
    pub max: u8,
}

impl EdgeBitsRange {
    /// Clamp edge bits into the range
    pub fn clamp(&self, edge_bits: u8) -> u8 {
        edge_bits.clamp(self.min, self.max)
    }

    /// Whether the edge bits lie in the range
    pub fn contains(&self, edge_bits: u8) -> bool {
        (self.min..=self.max).contains(&edge_bits)
    }
}

/// Proof-of-work configuration of a network
///
/// Cuckatoo has no parameters of its own and is weighed against the
/// cuckaroo graph sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowConfig {
    /// Cuckaroo graph sizes
    pub cuckaroo: EdgeBitsRange,
    /// Cuckaroom graph sizes
    pub cuckaroom: EdgeBitsRange,
}

/// Parameters of a network relevant to difficulty conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkParams {
    /// Which network these are
    pub network: Network,
    /// Proof-of-work configuration
    pub pow_config: PowConfig,
}

const fn range(min: u8, max: u8) -> EdgeBitsRange {
    EdgeBitsRange { min, max }
}

static MAINNET_PARAMS: Lazy<NetworkParams> = Lazy::new(|| NetworkParams {
    network: Network::Mainnet,
    pow_config: PowConfig {
        cuckaroo: range(24, 32),
        cuckaroom: range(29, 32),
    },
});

static TESTNET_PARAMS: Lazy<NetworkParams> = Lazy::new(|| NetworkParams {
    network: Network::Testnet,
    pow_config: PowConfig {
        cuckaroo: range(24, 32),
        cuckaroom: range(24, 32),
    },
});

static PRIVNET_PARAMS: Lazy<NetworkParams> = Lazy::new(|| NetworkParams {
    network: Network::Privnet,
    pow_config: PowConfig {
        cuckaroo: range(24, 32),
        cuckaroom: range(24, 32),
    },
});

static MIXNET_PARAMS: Lazy<NetworkParams> = Lazy::new(|| NetworkParams {
    network: Network::Mixnet,
    pow_config: PowConfig {
        cuckaroo: range(24, 29),
        cuckaroom: range(24, 29),
    },
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_from_name() {
        assert_eq!(Network::from_name("mainnet"), Network::Mainnet);
        assert_eq!(Network::from_name("PRIVNET"), Network::Privnet);
        assert_eq!(Network::from_name("mixnet"), Network::Mixnet);
        assert_eq!(Network::from_name("testnet"), Network::Testnet);
        assert_eq!(Network::from_name("moonnet"), Network::Testnet);
        assert_eq!(Network::from_name(""), Network::Testnet);
    }

    #[test]
    fn test_params_match_network() {
        for network in [
            Network::Mainnet,
            Network::Testnet,
            Network::Privnet,
            Network::Mixnet,
        ] {
            let params = network.params();
            assert_eq!(params.network, network);
            let pow = &params.pow_config;
            for range in [pow.cuckaroo, pow.cuckaroom] {
                assert!(range.min <= range.max);
            }
        }
    }

    #[test]
    fn test_edge_bits_range() {
        let r = range(24, 32);
        assert_eq!(r.clamp(19), 24);
        assert_eq!(r.clamp(29), 29);
        assert_eq!(r.clamp(40), 32);
        assert!(r.contains(24));
        assert!(!r.contains(33));
    }

    #[test]
    fn test_params_are_shared() {
        let a: *const NetworkParams = Network::Testnet.params();
        let b: *const NetworkParams = Network::from_name("unknown").params();
        assert_eq!(a, b);
    }
}
