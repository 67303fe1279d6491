//! Deterministic Ethernet test-traffic trace generator.
//!
//! Ethertrace synthesizes the textual traces hardware test benches replay
//! onto the wire: back-to-back Ethernet frames (preamble, MAC addresses,
//! EtherType, zero-filled payload, CRC-32 trailer) interleaved with
//! Inter-Frame-Gap filler, timed so the trace approximates real wire
//! occupancy at a configured line rate.
//!
//! # Features
//!
//! - **Deterministic**: identical profiles produce identical traces
//! - **Streaming**: traces of any length are emitted word-by-word, never
//!   materialized in memory
//! - **Burst shaping**: frames-per-burst and burst periodicity drive the
//!   filler arithmetic
//! - **Two profile formats**: legacy `Eth.*` key-value files and YAML
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ethertrace::Ethertrace;
//!
//! fn main() -> ethertrace::Result<()> {
//!     let summary = Ethertrace::generate("profiles/example.cfg", "packet_out.txt")?;
//!     println!("Total frames emitted: {}", summary.frames);
//!     Ok(())
//! }
//! ```
//!
//! For finer control (padding policy, cancellation, custom sinks) compose the
//! pieces directly:
//!
//! ```rust
//! use ethertrace::{BurstPlan, MemorySink, TraceWriter, TrafficProfile};
//!
//! # fn main() -> ethertrace::Result<()> {
//! let profile = TrafficProfile::from_config_str("Eth.LineRate 10\nEth.CaptureSizeMs 1\nEth.MaxPacketSize 64\nEth.BurstSize 1\nEth.BurstPeriodicity_us 1000\nEth.DestAddress AABBCCDDEEFF\nEth.SourceAddress 112233445566\n")?;
//! let plan = BurstPlan::plan(&profile);
//!
//! let mut sink = MemorySink::new();
//! let summary = TraceWriter::new(profile, plan).pad_to_word(true).emit(&mut sink)?;
//! assert_eq!(summary.bursts, 1);
//! # Ok(())
//! # }
//! ```

// Core types and error handling
mod error;
pub mod hex;
pub mod profile;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;

// Codec and trace assembly
pub mod crc;
pub mod emit;
pub mod frame;
pub mod timing;

// Core exports
pub use error::*;
pub use profile::TrafficProfile;

// Codec exports
pub use crc::{Crc32, crc32};
pub use emit::{IFG_WORD, LineSink, MemorySink, TraceSink, TraceSummary, TraceWriter};
pub use frame::{ETHERTYPE_IPV4, EthernetFrame, MIN_FRAME_SIZE_BYTES, PREAMBLE_SFD};
pub use timing::BurstPlan;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Unified entry point for trace generation.
///
/// This factory wires the profile loader, timing model, and serializer for
/// the common file-to-file case. Compose [`TraceWriter`] directly for custom
/// sinks or policies.
///
/// # Examples
///
/// ```rust,no_run
/// use ethertrace::Ethertrace;
///
/// fn main() -> ethertrace::Result<()> {
///     let profile = Ethertrace::load_profile("profiles/example.cfg")?;
///     profile.validate()?;
///
///     let summary = Ethertrace::generate("profiles/example.cfg", "packet_out.txt")?;
///     println!("{} frames", summary.frames);
///     Ok(())
/// }
/// ```
pub struct Ethertrace;

impl Ethertrace {
    /// Load a traffic profile from a key-value or YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a recognized key fails
    /// to parse. No semantic validation is performed; call
    /// [`TrafficProfile::validate`] for that.
    pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<TrafficProfile> {
        TrafficProfile::from_file(path)
    }

    /// Generate a complete trace file from a configuration file.
    ///
    /// Loads the profile, computes the burst plan, and streams the trace to
    /// `output`, one hex word per line, with the legacy short-final-line
    /// layout.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configuration cannot be read or parsed
    /// - the frame size leaves no room for the mandatory fields
    /// - a MAC address does not decode as hex
    /// - the output file cannot be created or written
    pub fn generate<C: AsRef<Path>, O: AsRef<Path>>(config: C, output: O) -> Result<TraceSummary> {
        let profile = TrafficProfile::from_file(config)?;
        let plan = BurstPlan::plan(&profile);

        let output = output.as_ref();
        let file = File::create(output).map_err(|e| {
            TraceError::sink_error(format!("creating trace file {}", output.display()), e)
        })?;
        let mut sink = LineSink::new(BufWriter::new(file));

        let summary = TraceWriter::new(profile, plan).emit(&mut sink)?;
        sink.into_inner()?;

        info!("Wrote {} trace words to {}", summary.words, output.display());
        Ok(summary)
    }
}
