//! Ethernet frame assembly
//!
//! Builds one logical frame as an ordered list of hex-encoded byte ranges:
//! preamble+SFD, destination MAC, source MAC, EtherType, zero-filled payload,
//! and the CRC-32 trailer computed over everything before it. The trace
//! serializer later flattens these fields into 4-byte words; this module only
//! guarantees the layout.
//!
//! ## Frame Layout
//!
//! | Field        | Bytes | Content                          |
//! |--------------|-------|----------------------------------|
//! | Preamble+SFD | 8     | `FB555555555555D5`               |
//! | Destination  | 6     | profile `dest_mac`, verbatim     |
//! | Source       | 6     | profile `src_mac`, verbatim      |
//! | EtherType    | 2     | `0800` (IPv4 literal)            |
//! | Payload      | N−26  | zero octets                      |
//! | CRC-32       | 4     | trailer over all preceding bytes |
//!
//! The decoded length of the field list always equals the profile's
//! `max_frame_size_bytes` exactly.

use crate::crc::Crc32;
use crate::profile::TrafficProfile;
use crate::{Result, TraceError, hex};
use tracing::trace;

/// Preamble plus start-of-frame delimiter, 8 bytes.
pub const PREAMBLE_SFD: &str = "FB555555555555D5";

/// Fixed EtherType field, 2 bytes. Generalizing beyond IPv4 is a non-goal.
pub const ETHERTYPE_IPV4: &str = "0800";

/// Smallest frame that still fits the mandatory fields:
/// preamble (8) + dest (6) + src (6) + EtherType (2) + CRC (4).
pub const MIN_FRAME_SIZE_BYTES: u32 = 8 + 6 + 6 + 2 + 4;

/// One assembled frame: hex-digit fields in emission order, CRC last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    fields: Vec<String>,
}

impl EthernetFrame {
    /// Assemble a frame for the given profile.
    ///
    /// Fails with [`TraceError::Size`] when `max_frame_size_bytes` leaves no
    /// room for a non-negative payload, and with [`TraceError::MalformedHex`]
    /// when a MAC address does not decode as hex octets. Both are fatal
    /// configuration defects; no partial frame is produced.
    pub fn build(profile: &TrafficProfile) -> Result<Self> {
        if profile.max_frame_size_bytes < MIN_FRAME_SIZE_BYTES {
            return Err(TraceError::size_error(
                profile.max_frame_size_bytes,
                MIN_FRAME_SIZE_BYTES,
            ));
        }
        let payload_bytes = profile.max_frame_size_bytes - MIN_FRAME_SIZE_BYTES;

        let fields = vec![
            PREAMBLE_SFD.to_string(),
            profile.dest_mac.clone(),
            profile.src_mac.clone(),
            ETHERTYPE_IPV4.to_string(),
            "0".repeat(payload_bytes as usize * 2),
        ];

        // CRC over the decoded octets of every field so far, in field order
        let mut digest = Crc32::new();
        for (field, name) in fields.iter().zip(FIELD_NAMES) {
            digest.update(&hex::decode_field(name, field)?);
        }
        let crc = digest.finalize();
        trace!("Assembled {}-byte frame, crc={:08x}", profile.max_frame_size_bytes, crc);

        let mut fields = fields;
        fields.push(format!("{:08x}", crc));

        Ok(Self { fields })
    }

    /// Hex-digit fields in emission order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Decoded byte length of the whole frame.
    pub fn byte_len(&self) -> usize {
        self.fields.iter().map(|f| f.len() / 2).sum()
    }

    /// The CRC trailer as 8 zero-padded hex digits.
    pub fn crc_field(&self) -> &str {
        self.fields.last().expect("frame always carries a CRC trailer")
    }
}

const FIELD_NAMES: [&str; 5] =
    ["preamble", "destAddress", "sourceAddress", "etherType", "payload"];
