//! Masked CRC32C checksums
//!
//! Every TFRecord checksum is a CRC32C (Castagnoli) rotated right by 15 bits
//! and offset by [`CRC_MASK_DELTA`]. Masking keeps a checksum stored inside
//! checksummed data from colliding with the checksum of that data.

use crate::constants::CRC_MASK_DELTA;

/// Mask a raw CRC32C value
pub const fn mask(crc: u32) -> u32 {
    ((crc >> 15) | (crc << 17)).wrapping_add(CRC_MASK_DELTA)
}

/// Recover the raw CRC32C value from a masked one
pub const fn unmask(masked: u32) -> u32 {
    let rot = masked.wrapping_sub(CRC_MASK_DELTA);
    (rot >> 17) | (rot << 15)
}

/// Compute the masked CRC32C of `data`
pub fn masked_crc32c(data: &[u8]) -> u32 {
    mask(crc32c::crc32c(data))
}

/// Check `data` against a stored masked checksum.
///
/// Returns the computed masked checksum on mismatch.
pub fn verify(data: &[u8], expected: u32) -> Result<(), u32> {
    let actual = masked_crc32c(data);
    if actual == expected {
        Ok(())
    } else {
        Err(actual)
    }
}
