//! CRC-32 engine for frame trailers
//!
//! Implements the standard bit-reflected CRC-32 used by Ethernet (IEEE 802.3):
//! polynomial `0xEDB88320`, initial register `0xFFFFFFFF`, one bit processed
//! at a time, final register XORed with `0xFFFFFFFF`.
//!
//! The bit-at-a-time form is intentionally table-free; it is the reference
//! against which any faster variant must stay bit-identical. The incremental
//! [`Crc32`] digest exists so the frame assembler can feed fields one at a
//! time without flattening them into a single buffer first.

/// Reflected IEEE 802.3 polynomial.
const CRC32_POLY: u32 = 0xEDB8_8320;

/// Initial shift register value, also the final XOR mask.
const CRC32_INIT: u32 = 0xFFFF_FFFF;

/// Compute the CRC-32 of an octet sequence in one call.
///
/// Deterministic and side-effect free. The empty sequence yields `0x00000000`
/// (the unmodified initial register XORed with the final mask).
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut digest = Crc32::new();
    digest.update(bytes);
    digest.finalize()
}

/// Incremental CRC-32 digest.
///
/// Feeding octets through any sequence of [`update`](Crc32::update) calls
/// produces the same result as a single [`crc32`] call over the
/// concatenation.
#[derive(Debug, Clone)]
pub struct Crc32 {
    register: u32,
}

impl Crc32 {
    /// Create a digest in its initial state.
    pub fn new() -> Self {
        Self { register: CRC32_INIT }
    }

    /// Fold more octets into the digest.
    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.register ^= byte as u32;
            for _ in 0..8 {
                if self.register & 1 != 0 {
                    self.register = (self.register >> 1) ^ CRC32_POLY;
                } else {
                    self.register >>= 1;
                }
            }
        }
    }

    /// Consume the digest and return the checksum.
    pub fn finalize(self) -> u32 {
        self.register ^ CRC32_INIT
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}
