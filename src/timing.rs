//! Burst timing model
//!
//! Pure arithmetic over a [`TrafficProfile`]: how long one frame occupies the
//! wire, how many bursts fit in the capture window, and how many 4-byte
//! filler words pad out the inter-frame gaps and the idle tail of each burst
//! period. Evaluated once per run; the serializer reads the result and never
//! recomputes it.

use crate::profile::TrafficProfile;
use tracing::debug;

/// Bits carried by one 4-byte trace word.
const BITS_PER_WORD: f64 = 32.0;

/// Derived, read-only timing numbers for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstPlan {
    /// Number of whole burst periods in the capture window.
    ///
    /// Zero is valid and yields an empty trace.
    pub total_bursts: u64,

    /// Wire time of a single frame in microseconds.
    pub per_frame_time_us: f64,

    /// IFG filler words written after every frame.
    pub inter_frame_filler_words: u32,

    /// IFG filler words written after each burst's frames, filling the idle
    /// remainder of the burst period.
    ///
    /// Clamped to zero when the burst's own frames already exceed the period;
    /// never allowed to wrap negative.
    pub end_of_burst_filler_words: u64,
}

impl BurstPlan {
    /// Compute the plan for a profile.
    ///
    /// A zero `burst_period_us` yields zero bursts rather than dividing by
    /// zero; profile validation is the caller's concern, so the plan only
    /// promises not to panic on degenerate input.
    pub fn plan(profile: &TrafficProfile) -> Self {
        let total_bursts = if profile.burst_period_us == 0 {
            0
        } else {
            u64::from(profile.capture_duration_ms) * 1000 / u64::from(profile.burst_period_us)
        };

        // Frame bits divided by line-rate bits per microsecond
        let frame_bits = f64::from(profile.max_frame_size_bytes) * 8.0;
        let bits_per_us = f64::from(profile.line_rate_gbps) * 1000.0;
        let per_frame_time_us = frame_bits / bits_per_us;

        // Byte-to-word ceiling, independent of timing
        let inter_frame_filler_words = profile.min_ifg_bytes_per_frame.div_ceil(4);

        let burst_time_us = f64::from(profile.frames_per_burst) * per_frame_time_us;
        let remaining_us = f64::from(profile.burst_period_us) - burst_time_us;
        let remaining_bits = remaining_us * bits_per_us;
        let end_of_burst_filler_words = if remaining_bits > 0.0 {
            (remaining_bits / BITS_PER_WORD).ceil() as u64
        } else {
            0
        };

        let plan = Self {
            total_bursts,
            per_frame_time_us,
            inter_frame_filler_words,
            end_of_burst_filler_words,
        };
        debug!(
            "Burst plan: {} bursts, {:.4} us/frame, {} inter-frame words, {} end-of-burst words",
            plan.total_bursts,
            plan.per_frame_time_us,
            plan.inter_frame_filler_words,
            plan.end_of_burst_filler_words
        );
        plan
    }
}
