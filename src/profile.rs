//! Traffic profile configuration
//!
//! A [`TrafficProfile`] describes one trace run: line rate, capture duration,
//! frame size, burst shape, and the MAC addresses stamped into every frame.
//! It is constructed once from a configuration source and read-only for the
//! rest of the run.
//!
//! Two on-disk formats are supported:
//!
//! - the legacy `KeyName value` line format with `Eth.*` keys
//!   (`Eth.LineRate 10`), matching the configuration files used by the
//!   hardware test benches this tool feeds;
//! - YAML documents with camelCase keys (`lineRateGbps: 10`), for
//!   profiles managed alongside other structured tooling config.
//!
//! Loading performs no semantic validation: unrecognized keys are ignored and
//! missing keys keep their zero/default value. Callers that want a usable
//! profile up front (the CLI does) run [`TrafficProfile::validate`].

use crate::frame::MIN_FRAME_SIZE_BYTES;
use crate::{Result, TraceError, hex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace, warn};

// Legacy configuration key names, kept verbatim for bench compatibility.
const KEY_LINE_RATE: &str = "Eth.LineRate";
const KEY_CAPTURE_MS: &str = "Eth.CaptureSizeMs";
const KEY_MIN_IFG: &str = "Eth.MinNumOfIFGsPerPacket";
const KEY_DEST_ADDRESS: &str = "Eth.DestAddress";
const KEY_SRC_ADDRESS: &str = "Eth.SourceAddress";
const KEY_MAX_FRAME_SIZE: &str = "Eth.MaxPacketSize";
const KEY_FRAMES_PER_BURST: &str = "Eth.BurstSize";
const KEY_BURST_PERIOD_US: &str = "Eth.BurstPeriodicity_us";

/// Width of a MAC address field in hex digits.
const MAC_HEX_DIGITS: usize = 12;

/// Immutable description of one trace run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrafficProfile {
    /// Line rate in gigabits per second.
    pub line_rate_gbps: u32,

    /// Capture duration in milliseconds.
    pub capture_duration_ms: u32,

    /// Minimum inter-frame gap inserted after every frame, in bytes.
    pub min_ifg_bytes_per_frame: u32,

    /// Destination MAC address as 12 hex digits, emitted verbatim.
    pub dest_mac: String,

    /// Source MAC address as 12 hex digits, emitted verbatim.
    pub src_mac: String,

    /// Total frame size in bytes, including preamble and CRC trailer.
    pub max_frame_size_bytes: u32,

    /// Number of frames emitted back-to-back per burst.
    pub frames_per_burst: u32,

    /// Burst periodicity in microseconds.
    pub burst_period_us: u32,
}

impl TrafficProfile {
    /// Load a profile from a configuration file.
    ///
    /// `.yaml`/`.yml` paths are parsed as YAML documents; anything else is
    /// treated as the legacy key-value format. An unreadable source is a
    /// fatal [`TraceError::Configuration`], surfaced before any output.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TraceError::configuration(path.to_path_buf(), e))?;

        let extension = path.extension().and_then(|s| s.to_str());
        let profile = match extension {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            _ => Self::from_config_str(&text)?,
        };

        debug!("Loaded traffic profile from {}: {:?}", path.display(), profile);
        Ok(profile)
    }

    /// Parse the legacy `KeyName value` line format.
    ///
    /// Blank lines and unrecognized keys are ignored. Missing keys leave the
    /// corresponding field at its zero/default value. A recognized key whose
    /// value does not parse is a [`TraceError::ConfigValue`] naming the key.
    pub fn from_config_str(text: &str) -> Result<Self> {
        let mut profile = TrafficProfile::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (key, value) = match line.split_once(char::is_whitespace) {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (line, ""),
            };

            match key {
                KEY_LINE_RATE => profile.line_rate_gbps = parse_int(key, value)?,
                KEY_CAPTURE_MS => profile.capture_duration_ms = parse_int(key, value)?,
                KEY_MIN_IFG => profile.min_ifg_bytes_per_frame = parse_int(key, value)?,
                KEY_DEST_ADDRESS => profile.dest_mac = value.to_string(),
                KEY_SRC_ADDRESS => profile.src_mac = value.to_string(),
                KEY_MAX_FRAME_SIZE => profile.max_frame_size_bytes = parse_int(key, value)?,
                KEY_FRAMES_PER_BURST => profile.frames_per_burst = parse_int(key, value)?,
                KEY_BURST_PERIOD_US => profile.burst_period_us = parse_int(key, value)?,
                _ => {
                    trace!("Ignoring unrecognized configuration key '{}'", key);
                }
            }
        }

        Ok(profile)
    }

    /// Parse a YAML profile document.
    ///
    /// Keys use the camelCase field names (`lineRateGbps`, `destMac`, ...).
    /// Missing keys default exactly as in the key-value format.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml_ng::from_str(text)
            .map_err(|e| TraceError::config_value("<yaml profile>", e.to_string()))
    }

    /// Check that the profile satisfies the documented input constraints.
    ///
    /// Loading never validates; this is the caller-side hook. Reports the
    /// first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.line_rate_gbps == 0 {
            return Err(TraceError::config_value(KEY_LINE_RATE, "line rate must be > 0 Gbps"));
        }
        if self.capture_duration_ms == 0 {
            return Err(TraceError::config_value(KEY_CAPTURE_MS, "capture duration must be > 0 ms"));
        }
        if self.max_frame_size_bytes < MIN_FRAME_SIZE_BYTES {
            warn!(
                "Frame size {} below minimum {}",
                self.max_frame_size_bytes, MIN_FRAME_SIZE_BYTES
            );
            return Err(TraceError::size_error(self.max_frame_size_bytes, MIN_FRAME_SIZE_BYTES));
        }
        if self.frames_per_burst == 0 {
            return Err(TraceError::config_value(KEY_FRAMES_PER_BURST, "burst size must be > 0"));
        }
        if self.burst_period_us == 0 {
            return Err(TraceError::config_value(
                KEY_BURST_PERIOD_US,
                "burst periodicity must be > 0 us",
            ));
        }
        hex::require_width("destAddress", &self.dest_mac, MAC_HEX_DIGITS)?;
        hex::require_width("sourceAddress", &self.src_mac, MAC_HEX_DIGITS)?;
        Ok(())
    }
}

fn parse_int(key: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|e| TraceError::config_value(key, format!("'{}' is not an integer: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CONFIG: &str = "\
Eth.LineRate 10
Eth.CaptureSizeMs 1
Eth.MinNumOfIFGsPerPacket 12
Eth.DestAddress AABBCCDDEEFF
Eth.SourceAddress 112233445566
Eth.MaxPacketSize 64
Eth.BurstSize 1
Eth.BurstPeriodicity_us 1000
";

    #[test]
    fn test_parse_sample_config() {
        let profile = TrafficProfile::from_config_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(profile.line_rate_gbps, 10);
        assert_eq!(profile.capture_duration_ms, 1);
        assert_eq!(profile.min_ifg_bytes_per_frame, 12);
        assert_eq!(profile.dest_mac, "AABBCCDDEEFF");
        assert_eq!(profile.src_mac, "112233445566");
        assert_eq!(profile.max_frame_size_bytes, 64);
        assert_eq!(profile.frames_per_burst, 1);
        assert_eq!(profile.burst_period_us, 1000);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let text = "Eth.LineRate 10\nEth.FutureKnob 42\nUnrelated banana\n";
        let profile = TrafficProfile::from_config_str(text).unwrap();
        assert_eq!(profile.line_rate_gbps, 10);
    }

    #[test]
    fn test_missing_keys_default_to_zero() {
        let profile = TrafficProfile::from_config_str("Eth.LineRate 100\n").unwrap();
        assert_eq!(profile.line_rate_gbps, 100);
        assert_eq!(profile.capture_duration_ms, 0);
        assert_eq!(profile.max_frame_size_bytes, 0);
        assert!(profile.dest_mac.is_empty());
    }

    #[test]
    fn test_unparseable_value_names_key() {
        let err = TrafficProfile::from_config_str("Eth.BurstSize many\n").unwrap_err();
        assert!(matches!(err, TraceError::ConfigValue { .. }));
        assert!(err.to_string().contains("Eth.BurstSize"));
    }

    #[test]
    fn test_yaml_profile_round_trip() {
        let yaml = "\
lineRateGbps: 10
captureDurationMs: 1
minIfgBytesPerFrame: 12
destMac: AABBCCDDEEFF
srcMac: \"112233445566\"
maxFrameSizeBytes: 64
framesPerBurst: 1
burstPeriodUs: 1000
";
        let from_yaml = TrafficProfile::from_yaml_str(yaml).unwrap();
        let from_kv = TrafficProfile::from_config_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(from_yaml, from_kv);
    }

    #[test]
    fn test_yaml_missing_keys_default() {
        let profile = TrafficProfile::from_yaml_str("lineRateGbps: 40\n").unwrap();
        assert_eq!(profile.line_rate_gbps, 40);
        assert_eq!(profile.burst_period_us, 0);
    }

    #[test]
    fn test_validate_rejects_undersized_frame() {
        let mut profile = TrafficProfile::from_config_str(SAMPLE_CONFIG).unwrap();
        profile.max_frame_size_bytes = 25;
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, TraceError::Size { frame_size: 25, minimum: 26 }));
    }

    #[test]
    fn test_validate_rejects_short_mac() {
        let mut profile = TrafficProfile::from_config_str(SAMPLE_CONFIG).unwrap();
        profile.dest_mac = "AABBCC".to_string();
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, TraceError::MalformedHex { .. }));
        assert!(err.to_string().contains("destAddress"));
    }

    #[test]
    fn test_from_file_missing_path_is_configuration_error() {
        let err = TrafficProfile::from_file("/nonexistent/ethertrace.cfg").unwrap_err();
        assert!(matches!(err, TraceError::Configuration { .. }));
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let kv_path = dir.path().join("profile.cfg");
        std::fs::write(&kv_path, SAMPLE_CONFIG).unwrap();
        let from_kv = TrafficProfile::from_file(&kv_path).unwrap();
        assert_eq!(from_kv.line_rate_gbps, 10);

        let yaml_path = dir.path().join("profile.yaml");
        std::fs::write(&yaml_path, "lineRateGbps: 10\nmaxFrameSizeBytes: 64\n").unwrap();
        let from_yaml = TrafficProfile::from_file(&yaml_path).unwrap();
        assert_eq!(from_yaml.max_frame_size_bytes, 64);
    }
}
