//! Constants for the TFRecord container format

/// Size of the little-endian `u64` length prefix
pub const LENGTH_SIZE: usize = 8;

/// Size of a masked CRC32C checksum in bytes
pub const CRC32C_SIZE: usize = 4;

/// Header size: length prefix followed by its checksum
/// 8 (length) + 4 (length crc) = 12 bytes
pub const HEADER_SIZE: usize = LENGTH_SIZE + CRC32C_SIZE;

/// Footer size: the payload checksum
pub const FOOTER_SIZE: usize = CRC32C_SIZE;

/// Bytes of framing around every payload
pub const FRAMING_OVERHEAD: usize = HEADER_SIZE + FOOTER_SIZE;

/// Constant added to the rotated CRC when masking
pub const CRC_MASK_DELTA: u32 = 0xa282_ead8;

/// Default target index when none is configured
pub const DEFAULT_TARGET_INDEX: u64 = 0;

/// Compression applied to the whole record file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Plain framed records
    #[default]
    None,
    /// zlib stream (RFC 1950)
    Zlib,
    /// gzip stream (RFC 1952)
    Gzip,
}

impl Compression {
    /// Parse a compression name as used in configuration files and flags.
    ///
    /// Accepts the empty string as "none", matching the reader options of the
    /// TensorFlow tooling that produces these files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "" | "none" => Some(Compression::None),
            "zlib" => Some(Compression::Zlib),
            "gzip" => Some(Compression::Gzip),
            _ => None,
        }
    }

    /// Canonical lowercase name
    pub const fn name(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Zlib => "zlib",
            Compression::Gzip => "gzip",
        }
    }
}
