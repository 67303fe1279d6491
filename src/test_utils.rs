//! Test utilities shared by unit tests, integration tests, and benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use crate::profile::TrafficProfile;

/// The reference profile used throughout the test suite: 10 Gbps, 64-byte
/// frames, one frame per 1000 us burst, 1 ms capture.
pub fn reference_profile() -> TrafficProfile {
    TrafficProfile {
        line_rate_gbps: 10,
        capture_duration_ms: 1,
        min_ifg_bytes_per_frame: 12,
        dest_mac: "AABBCCDDEEFF".to_string(),
        src_mac: "112233445566".to_string(),
        max_frame_size_bytes: 64,
        frames_per_burst: 1,
        burst_period_us: 1000,
    }
}
