//! Integration tests for the difficulty toolkit

use clap::Parser;
use powdiff::commands::{self, Output, PowSelection, ScaleSettings};
use powdiff::config::{Args, Config};
use powdiff::error::Error;
use powdiff::params::Network;
use pretty_assertions::assert_eq;
use std::io::Write;

/// Parse a command line and run it the way the binary does
fn run(argv: &[&str], config: &Config) -> powdiff::Result<String> {
    let mut full = vec!["powdiff"];
    full.extend_from_slice(argv);
    let args = Args::try_parse_from(full).expect("command line should parse");

    let detail = args.command.detail();
    let output = commands::execute(args.command, config)?;
    output.render(detail, args.json)
}

#[test]
fn test_compact_target_roundtrip() {
    let config = Config::default();
    let target = run(&["compact-to-target", "0x1d00ffff"], &config).unwrap();
    assert_eq!(target, format!("00000000ffff{}", "0".repeat(52)));

    let compact = run(&["target-to-compact", &target], &config).unwrap();
    assert_eq!(compact, "486604799");
}

#[test]
fn test_cuckoo_target_commands() {
    let config = Config::default();

    // Difficulty 96 (0x01600000) on 24-bit graphs, testnet weight 48
    let target = run(
        &["compact-to-target", "--pow", "cuckoo24", "0x01600000"],
        &config,
    )
    .unwrap();
    assert_eq!(target, format!("8{}", "0".repeat(63)));

    let compact = run(&["target-to-compact", "--pow", "cuckoo24", &target], &config).unwrap();
    assert_eq!(compact, 0x01600000u32.to_string());
}

#[test]
fn test_unknown_pow_is_usage_error() {
    let err = run(
        &["compact-to-target", "--pow", "sha256d", "0x1d00ffff"],
        &Config::default(),
    )
    .unwrap_err();
    assert!(err.is_usage_error());
    assert!(err.to_string().contains("sha256d"));
}

#[test]
fn test_gps_commands_roundtrip() {
    let config = Config::default();
    let compact = run(&["gps-to-compact", "-e", "24", "10"], &config).unwrap();
    let gps: f64 = run(&["compact-to-gps", "-e", "24", &compact], &config)
        .unwrap()
        .parse()
        .unwrap();
    assert!((gps - 10.0).abs() < 1e-3, "gps was {}", gps);
}

#[test]
fn test_gps_detail_output() {
    let text = run(
        &["compact-to-gps", "-p", "-t", "1", "-e", "24", "0x21008000"],
        &Config::default(),
    )
    .unwrap();
    assert!(text.contains("scale      : 48"));
    assert!(text.contains("block time : 1s"));
    assert!(text.ends_with("gps        : 96"));
}

#[test]
fn test_hashrate_commands() {
    let config = Config::default();
    let compact = run(&["hashrate-to-compact", "1000000"], &config).unwrap();
    assert_eq!(compact, 0x1d2af31du32.to_string());

    let rate = run(&["compact-to-hashrate", "-u", "M", &compact], &config).unwrap();
    assert_eq!(rate, "1.000 MH/s");

    let detail = run(&["compact-to-hashrate", "-p", &compact], &config).unwrap();
    assert!(detail.contains("difficulty : 100000027\n"));
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let config = Config::default();
    for argv in [
        &["hashrate-to-compact", "1.5"][..],
        &["compact-to-hashrate", "-u", "X", "0x1d00ffff"][..],
        &["gps-to-compact", "fast"][..],
        &["target-to-compact", "not-hex"][..],
        &["compact-to-target", "0x04923456"][..],
        &["compact-to-target", "0x2200ffff"][..],
        &["gps-to-compact", "-t", "0", "10"][..],
    ] {
        let err = run(argv, &config).unwrap_err();
        assert!(err.is_usage_error(), "{:?} gave {}", argv, err);
    }
}

#[test]
fn test_json_output() {
    let config = Config::default();

    let text = run(&["--json", "hashrate-to-compact", "1000000"], &config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["compact"], 0x1d2af31d);

    let text = run(&["compact-to-hashrate", "--json", "-u", "k", "0x1d2af31d"], &config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["rate"], "1000.000 KH/s");
    assert_eq!(value["unit"], "K");
    assert_eq!(value["difficulty"], "100000027");

    let text = run(&["--json", "compact-to-target", "0x1d00ffff"], &config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["target"].as_str().map(str::len), Some(64));
}

#[test]
fn test_unknown_network_falls_back_to_testnet() {
    let config = Config::default();
    let unknown = run(&["gps-to-compact", "-n", "moonnet", "100"], &config).unwrap();
    let testnet = run(&["gps-to-compact", "-n", "testnet", "100"], &config).unwrap();
    assert_eq!(unknown, testnet);
}

#[test]
fn test_network_changes_scale() {
    let config = Config::default();
    // Mainnet cuckaroom starts at 29 edge bits, so the weight is far smaller
    let mainnet = run(&["compact-to-gps", "-n", "mainnet", "-t", "1", "0x21008000"], &config)
        .unwrap();
    let testnet = run(&["compact-to-gps", "-n", "testnet", "-t", "1", "0x21008000"], &config)
        .unwrap();
    assert_eq!(mainnet, "116");
    assert_eq!(testnet, "3712");
}

#[test]
fn test_config_file_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[defaults]
network = "mainnet"
algorithm = "cuckaroo"
edge_bits = 24
cuckoo_block_time = 1
hash_block_time = 50
unit = "K"
"#
    )
    .unwrap();

    let path = file.path().to_str().unwrap();
    let args = Args::try_parse_from(["powdiff", "-c", path, "compact-to-gps", "0x21008000"]).unwrap();
    let config = Config::from_args(&args).unwrap();
    assert_eq!(config.defaults.network, "mainnet");

    // Mainnet cuckaroo at 24 edge bits weighs 48, and 2 * 48 over one second
    let gps = run(&["compact-to-gps", "0x21008000"], &config).unwrap();
    assert_eq!(gps, "96");

    // Command options still win over the file
    let gps = run(&["compact-to-gps", "-t", "2", "0x21008000"], &config).unwrap();
    assert_eq!(gps, "48");

    let rate = run(&["compact-to-hashrate", "0x1d2af31d"], &config).unwrap();
    assert_eq!(rate, "2000.001 KH/s");
}

#[test]
fn test_invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[defaults]\nhash_block_time = 0").unwrap();

    let path = file.path().to_str().unwrap();
    let args = Args::try_parse_from(["powdiff", "-c", path, "hashrate-to-compact", "1"]).unwrap();
    assert!(matches!(Config::from_args(&args), Err(Error::Config(_))));
}

#[test]
fn test_library_api() {
    let settings = ScaleSettings {
        network: Network::Mixnet,
        algorithm: "cuckatoo".to_string(),
        edge_bits: 31,
        main_height: 1,
    };
    // Mixnet cuckaroo graphs stop at 29 edge bits
    assert_eq!(settings.scale(), (2 << 5) * 29);

    let target = commands::compact_to_target("1", PowSelection::Hash, &settings).unwrap();
    assert_eq!(target, "0".repeat(64));

    let output = Output::Target { target };
    assert_eq!(output.render(false, false).unwrap(), "0".repeat(64));
}

#[test]
fn test_concurrent_conversions() {
    let handles: Vec<_> = (0..8u64)
        .map(|i| {
            std::thread::spawn(move || {
                let rate = (1_000_000 * (i + 1)).to_string();
                commands::hashrate_to_compact(&rate, 100).unwrap()
            })
        })
        .collect();

    let results: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0], 0x1d2af31d);
    // Higher rates mean smaller targets
    for pair in results.windows(2) {
        assert!(compact_magnitude(pair[1]) < compact_magnitude(pair[0]));
    }
}

fn compact_magnitude(compact: u32) -> u64 {
    let exponent = u64::from(compact >> 24);
    let mantissa = u64::from(compact & 0x007f_ffff);
    (exponent << 32) | mantissa
}
