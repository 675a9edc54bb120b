//! Error types for TFRecord retrieval

use serde::Serialize;

/// What failed to validate inside a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum Corruption {
    /// Length prefix does not match its checksum
    #[error("length checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    LengthChecksum {
        /// The stored (masked) checksum.
        expected: u32,
        /// The checksum computed over the length bytes.
        actual: u32,
    },

    /// Payload does not match its trailing checksum
    #[error("payload checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    PayloadChecksum {
        /// The stored (masked) checksum.
        expected: u32,
        /// The checksum computed over the payload bytes.
        actual: u32,
    },

    /// Payload framed correctly but is not a valid message of the selected kind
    #[error("payload is not a valid {kind}: {reason}")]
    UndecodableMessage {
        /// Name of the message kind that was attempted.
        kind: &'static str,
        /// Decoder error text.
        reason: String,
    },
}

/// Errors that can occur while retrieving a record
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The record file could not be opened
    #[error("Failed to open record file {path}: {reason}")]
    Open {
        /// Path that was attempted.
        path: String,
        /// Underlying OS error text.
        reason: String,
    },

    /// The stream ended on a record boundary before the wanted record
    #[error("End of stream at record {ordinal} (offset {offset})")]
    EndOfStream {
        /// Ordinal of the record that was being read.
        ordinal: u64,
        /// Stream offset where the read started.
        offset: u64,
    },

    /// The stream ended in the middle of a record
    #[error("Truncated record at offset {offset}: expected {expected} bytes, got {actual}")]
    TruncatedRecord {
        /// Stream offset of the record start.
        offset: u64,
        /// Bytes the frame section required.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// A checksum failed, or the payload did not decode under the strict policy
    #[error("Corrupt record {ordinal} at offset {offset}: {corruption}")]
    CorruptRecord {
        /// Ordinal of the corrupt record.
        ordinal: u64,
        /// Stream offset of the record start.
        offset: u64,
        /// What failed.
        corruption: Corruption,
    },

    /// IO error during read
    #[error("IO error: {0}")]
    Io(String),
}

impl RecordError {
    /// Whether the error is a clean end of stream
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, RecordError::EndOfStream { .. })
    }

    /// Whether the error indicates damaged data (checksum, truncation or decode)
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            RecordError::CorruptRecord { .. } | RecordError::TruncatedRecord { .. }
        )
    }
}

impl From<std::io::Error> for RecordError {
    fn from(err: std::io::Error) -> Self {
        RecordError::Io(err.to_string())
    }
}
