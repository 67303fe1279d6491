//! Trace serialization
//!
//! Drains the burst plan in order: for each burst, for each frame, the frame's
//! hex fields are re-chunked into fixed 8-hex-digit words and written to the
//! sink immediately, followed by the frame's IFG filler; each burst closes
//! with the end-of-burst filler that pads out the idle remainder of its
//! period. Output ordering is strictly burst-major, then frame-major, then
//! word order.
//!
//! The trace is streamed, never materialized: a run of any length holds one
//! partial word in memory.
//!
//! ## Short final lines
//!
//! A frame whose byte length is not a multiple of 4 ends in a word shorter
//! than 8 hex digits. By default that short line is written as-is, matching
//! the traces existing bench tooling consumes. [`TraceWriter::pad_to_word`]
//! switches to zero-padding the final word instead; tests pin both behaviors.

use crate::frame::EthernetFrame;
use crate::profile::TrafficProfile;
use crate::timing::BurstPlan;
use crate::{Result, TraceError};
use serde::Serialize;
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

/// IFG filler word: four repetitions of octet `0x07`.
pub const IFG_WORD: &str = "07070707";

/// Hex digits per trace word (4 bytes).
const WORD_HEX_DIGITS: usize = 8;

/// Receives trace words in emission order.
///
/// A word is normally 8 hex digits; the final word of a frame may be shorter
/// unless padding is enabled on the writer.
pub trait TraceSink {
    fn write_word(&mut self, word: &str) -> Result<()>;
}

/// Sink writing one word per line to any [`std::io::Write`].
pub struct LineSink<W: Write> {
    inner: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Flush and recover the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.inner.flush().map_err(|e| TraceError::sink_error("flushing trace output", e))?;
        Ok(self.inner)
    }
}

impl<W: Write> TraceSink for LineSink<W> {
    fn write_word(&mut self, word: &str) -> Result<()> {
        writeln!(self.inner, "{}", word)
            .map_err(|e| TraceError::sink_error("writing trace word", e))
    }
}

/// Sink collecting words in memory, for tests and inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    words: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl TraceSink for MemorySink {
    fn write_word(&mut self, word: &str) -> Result<()> {
        self.words.push(word.to_string());
        Ok(())
    }
}

/// Counts reported once a run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceSummary {
    /// Total frames emitted.
    pub frames: u64,
    /// Total bursts completed.
    pub bursts: u64,
    /// Total trace lines written, filler included.
    pub words: u64,
}

/// Streams one trace run into a sink.
pub struct TraceWriter {
    profile: TrafficProfile,
    plan: BurstPlan,
    pad_to_word: bool,
    cancel: Option<CancellationToken>,
}

impl TraceWriter {
    pub fn new(profile: TrafficProfile, plan: BurstPlan) -> Self {
        Self { profile, plan, pad_to_word: false, cancel: None }
    }

    /// Zero-pad each frame's final short line to a full 4-byte word.
    ///
    /// Off by default: the legacy short-line layout is observable behavior
    /// that downstream tooling may depend on.
    pub fn pad_to_word(mut self, pad: bool) -> Self {
        self.pad_to_word = pad;
        self
    }

    /// Attach a cancellation token, checked between frames only.
    ///
    /// Cancellation truncates the trace at a frame boundary; output produced
    /// before the cut is unaffected.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Emit the whole trace, returning the run summary.
    ///
    /// The loop bound is fully determined by the plan before emission starts.
    pub fn emit<S: TraceSink>(&self, sink: &mut S) -> Result<TraceSummary> {
        let mut summary = TraceSummary { frames: 0, bursts: 0, words: 0 };

        for burst in 0..self.plan.total_bursts {
            for _ in 0..self.profile.frames_per_burst {
                if let Some(cancel) = &self.cancel {
                    if cancel.is_cancelled() {
                        info!("Trace cancelled after {} frames", summary.frames);
                        return Ok(summary);
                    }
                }

                let frame = EthernetFrame::build(&self.profile)?;

                let mut chunker = WordChunker::new();
                for field in frame.fields() {
                    chunker.push_hex(field, sink, &mut summary.words)?;
                }
                chunker.flush(sink, self.pad_to_word, &mut summary.words)?;
                summary.frames += 1;
                trace!("Frame {} emitted ({} bytes)", summary.frames, frame.byte_len());

                for _ in 0..self.plan.inter_frame_filler_words {
                    sink.write_word(IFG_WORD)?;
                    summary.words += 1;
                }
            }

            for _ in 0..self.plan.end_of_burst_filler_words {
                sink.write_word(IFG_WORD)?;
                summary.words += 1;
            }
            summary.bursts += 1;
            debug!("Burst {}/{} complete", burst + 1, self.plan.total_bursts);
        }

        info!(
            "Trace complete: {} frames in {} bursts, {} words",
            summary.frames, summary.bursts, summary.words
        );
        Ok(summary)
    }
}

/// Re-segments variable-length hex fields into fixed 8-digit words.
///
/// State is one partial word; reset per frame so filler never merges into
/// frame data.
struct WordChunker {
    line: String,
}

impl WordChunker {
    fn new() -> Self {
        Self { line: String::with_capacity(WORD_HEX_DIGITS) }
    }

    /// Append a field, writing every word completed along the way.
    fn push_hex<S: TraceSink>(&mut self, field: &str, sink: &mut S, words: &mut u64) -> Result<()> {
        let mut rest = field;
        while !rest.is_empty() {
            let take = (WORD_HEX_DIGITS - self.line.len()).min(rest.len());
            self.line.push_str(&rest[..take]);
            rest = &rest[take..];

            if self.line.len() == WORD_HEX_DIGITS {
                sink.write_word(&self.line)?;
                *words += 1;
                self.line.clear();
            }
        }
        Ok(())
    }

    /// Write any trailing partial word, short or zero-padded per policy.
    fn flush<S: TraceSink>(&mut self, sink: &mut S, pad: bool, words: &mut u64) -> Result<()> {
        if self.line.is_empty() {
            return Ok(());
        }
        if pad {
            while self.line.len() < WORD_HEX_DIGITS {
                self.line.push('0');
            }
        }
        sink.write_word(&self.line)?;
        *words += 1;
        self.line.clear();
        Ok(())
    }
}
