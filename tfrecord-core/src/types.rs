//! Core types for record retrieval

use crate::constants::FRAMING_OVERHEAD;
use bytes::Bytes;

/// Position of a reader inside a record stream
///
/// `offset` is the byte position of the next record's length prefix and
/// `ordinal` is the number of records read so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Byte offset of the next record
    pub offset: u64,

    /// Zero-based ordinal of the next record
    pub ordinal: u64,
}

impl Cursor {
    /// Cursor at the start of a stream
    pub const fn start() -> Self {
        Self {
            offset: 0,
            ordinal: 0,
        }
    }

    /// Whether no record has been read yet
    pub const fn is_at_start(&self) -> bool {
        self.offset == 0 && self.ordinal == 0
    }

    /// Move past one record of `payload_len` bytes
    pub fn advance(&mut self, payload_len: u64) {
        self.offset += payload_len + FRAMING_OVERHEAD as u64;
        self.ordinal += 1;
    }
}

/// One verified record read from a stream
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Zero-based position in scan order
    pub ordinal: u64,

    /// Byte offset of the length prefix
    pub offset: u64,

    /// Payload bytes (checksum verified)
    pub payload: Bytes,
}

impl Record {
    /// Total bytes the record occupies on disk, framing included
    pub fn frame_size(&self) -> usize {
        self.payload.len() + FRAMING_OVERHEAD
    }

    /// Offset immediately after the trailing checksum
    pub fn end_offset(&self) -> u64 {
        self.offset + self.frame_size() as u64
    }
}
