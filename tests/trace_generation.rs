//! End-to-end trace generation tests
//!
//! Drives the public API the way the CLI does: write a configuration file,
//! generate a trace file, and check the emitted word stream against the
//! documented layout.

use anyhow::{Context, Result, ensure};
use ethertrace::{BurstPlan, Ethertrace, IFG_WORD, TraceError, TrafficProfile, crc32};
use std::fs;
use std::path::Path;

/// Reference scenario: 10 Gbps, 64-byte frames, one frame per 1000 us burst,
/// 1 ms capture.
const REFERENCE_CONFIG: &str = "\
Eth.LineRate 10
Eth.CaptureSizeMs 1
Eth.MinNumOfIFGsPerPacket 12
Eth.DestAddress AABBCCDDEEFF
Eth.SourceAddress 112233445566
Eth.MaxPacketSize 64
Eth.BurstSize 1
Eth.BurstPeriodicity_us 1000
";

fn generate_from_text(dir: &Path, config_text: &str, name: &str) -> Result<Vec<String>> {
    let config_path = dir.join(name);
    fs::write(&config_path, config_text).context("writing config file")?;

    let output_path = dir.join(format!("{name}.trace"));
    Ethertrace::generate(&config_path, &output_path).context("generating trace")?;

    let trace = fs::read_to_string(&output_path).context("reading trace file")?;
    Ok(trace.lines().map(str::to_string).collect())
}

#[test]
fn reference_scenario_produces_documented_layout() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = generate_from_text(dir.path(), REFERENCE_CONFIG, "reference.cfg")?;

    // 1 burst of 1 frame: 16 frame words, 3 inter-frame IFG words, then the
    // end-of-burst filler computed by the plan
    let profile = TrafficProfile::from_config_str(REFERENCE_CONFIG)?;
    let plan = BurstPlan::plan(&profile);
    ensure!(plan.total_bursts == 1);
    ensure!(plan.inter_frame_filler_words == 3);
    ensure!(words.len() as u64 == 16 + 3 + plan.end_of_burst_filler_words);

    ensure!(words[0] == "FB555555", "trace must open with the preamble head, got {}", words[0]);
    ensure!(words[16..19].iter().all(|w| w == IFG_WORD));
    ensure!(words[19..].iter().all(|w| w == IFG_WORD));

    // The 16th frame word is the CRC-32 of the 60 bytes preceding it
    let mut preceding = Vec::with_capacity(60);
    for word in &words[..15] {
        ensure!(word.len() == 8, "frame word '{}' is not 4 bytes", word);
        for pair in 0..4 {
            let byte = u8::from_str_radix(&word[pair * 2..pair * 2 + 2], 16)
                .with_context(|| format!("decoding trace word '{}'", word))?;
            preceding.push(byte);
        }
    }
    let expected = format!("{:08x}", crc32(&preceding));
    ensure!(words[15] == expected, "CRC trailer {} != expected {}", words[15], expected);

    Ok(())
}

#[test]
fn yaml_and_key_value_profiles_emit_identical_traces() -> Result<()> {
    let dir = tempfile::tempdir()?;

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
    let from_kv = generate_from_text(dir.path(), REFERENCE_CONFIG, "profile.cfg")?;
    let from_yaml = generate_from_text(dir.path(), yaml, "profile.yaml")?;
    ensure!(from_kv == from_yaml);

    Ok(())
}

#[test]
fn unaligned_frame_keeps_legacy_short_final_line() -> Result<()> {
    let dir = tempfile::tempdir()?;

    // 65-byte frames: 130 hex digits leave 2 trailing digits per frame
    let config = REFERENCE_CONFIG.replace("Eth.MaxPacketSize 64", "Eth.MaxPacketSize 65");
    let words = generate_from_text(dir.path(), &config, "unaligned.cfg")?;

    ensure!(words[16].len() == 2, "expected a short final line, got '{}'", words[16]);
    ensure!(words[17] == IFG_WORD);

    Ok(())
}

#[test]
fn frame_count_scales_with_bursts() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("burst.cfg");
    let config = REFERENCE_CONFIG
        .replace("Eth.CaptureSizeMs 1", "Eth.CaptureSizeMs 5")
        .replace("Eth.BurstSize 1", "Eth.BurstSize 3");
    fs::write(&config_path, &config)?;

    let output_path = dir.path().join("burst.trace");
    let summary = Ethertrace::generate(&config_path, &output_path)?;

    // 5 bursts of 3 frames
    ensure!(summary.bursts == 5);
    ensure!(summary.frames == 15);

    let trace = fs::read_to_string(&output_path)?;
    ensure!(trace.lines().count() as u64 == summary.words);

    Ok(())
}

#[test]
fn unreadable_config_fails_before_any_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output_path = dir.path().join("never.trace");

    let err = Ethertrace::generate(dir.path().join("missing.cfg"), &output_path).unwrap_err();
    ensure!(matches!(err, TraceError::Configuration { .. }));
    ensure!(!output_path.exists(), "no output file may be created on a config error");

    Ok(())
}

#[test]
fn undersized_frame_aborts_the_whole_run() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("tiny.cfg");
    let config = REFERENCE_CONFIG.replace("Eth.MaxPacketSize 64", "Eth.MaxPacketSize 25");
    fs::write(&config_path, &config)?;

    let output_path = dir.path().join("tiny.trace");
    let err = Ethertrace::generate(&config_path, &output_path).unwrap_err();
    ensure!(matches!(err, TraceError::Size { frame_size: 25, minimum: 26 }));

    // The file exists (created before emission) but holds no partial trace
    let trace = fs::read_to_string(&output_path)?;
    ensure!(trace.is_empty(), "no partial trace may be written");

    Ok(())
}
