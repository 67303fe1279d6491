//! Command-line trace generator.
//!
//! Reads a traffic profile, validates it, and writes the trace file, printing
//! the frame summary on completion. Logging verbosity follows `RUST_LOG`.

use anyhow::Context;
use clap::Parser;
use ethertrace::{BurstPlan, LineSink, TraceWriter, TrafficProfile};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ethertrace", version, about = "Deterministic Ethernet test-traffic trace generator")]
struct Args {
    /// Traffic profile file (legacy `Eth.*` key-value format, or YAML)
    #[arg(short, long, default_value = "config.txt")]
    config: PathBuf,

    /// Output trace file, one hex word per line
    #[arg(short, long, default_value = "packet_out.txt")]
    output: PathBuf,

    /// Zero-pad each frame's final short line to a full 4-byte word
    #[arg(long)]
    pad_to_word: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let profile = TrafficProfile::from_file(&args.config)
        .with_context(|| format!("Loading profile {}", args.config.display()))?;
    profile.validate().context("Profile failed validation")?;

    let plan = BurstPlan::plan(&profile);

    let file = File::create(&args.output)
        .with_context(|| format!("Creating trace file {}", args.output.display()))?;
    let mut sink = LineSink::new(BufWriter::new(file));

    let summary = TraceWriter::new(profile, plan)
        .pad_to_word(args.pad_to_word)
        .emit(&mut sink)
        .context("Trace generation failed")?;
    sink.into_inner().context("Flushing trace file")?;

    println!("Total frames emitted: {}", summary.frames);
    Ok(())
}
