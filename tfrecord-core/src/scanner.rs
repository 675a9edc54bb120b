//! Whole-file record walks
//!
//! Walks every record from the start of a stream, collecting where each one
//! sits and stopping at the first integrity failure.

use crate::error::RecordError;
use crate::reader::RecordReader;
use serde::Serialize;
use std::io::Read;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Where a record sits in the stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedRecord {
    /// Zero-based ordinal
    pub ordinal: u64,

    /// Byte offset of the length prefix
    pub offset: u64,

    /// Payload length in bytes
    pub payload_len: usize,

    /// Total size of the record in bytes
    pub size: usize,
}

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Number of valid records read
    pub records_found: u64,

    /// Sum of payload lengths
    pub payload_bytes: u64,

    /// Bytes covered by valid records, framing included
    pub bytes_consumed: u64,

    /// Largest payload seen
    pub max_payload_len: usize,
}

impl ScanStats {
    /// Mean payload length, 0 for an empty stream
    pub fn mean_payload_len(&self) -> f64 {
        if self.records_found == 0 {
            return 0.0;
        }
        self.payload_bytes as f64 / self.records_found as f64
    }
}

/// Result of walking a stream
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    /// Every valid record, in order
    pub records: Vec<LocatedRecord>,

    /// Totals over `records`
    pub stats: ScanStats,

    /// The failure that ended the walk early, if any
    pub error: Option<RecordError>,
}

impl ScanReport {
    /// Whether the walk reached a clean end of stream
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

/// Read every record until end of stream or the first failure
pub fn scan_records<R: Read>(reader: RecordReader<R>) -> ScanReport {
    let mut records = Vec::new();
    let mut stats = ScanStats::default();
    let mut error = None;

    #[cfg(feature = "logging")]
    debug!("Starting record scan");

    for item in reader {
        match item {
            Ok(record) => {
                let located = LocatedRecord {
                    ordinal: record.ordinal,
                    offset: record.offset,
                    payload_len: record.payload.len(),
                    size: record.frame_size(),
                };

                stats.records_found += 1;
                stats.payload_bytes += located.payload_len as u64;
                stats.bytes_consumed += located.size as u64;
                stats.max_payload_len = stats.max_payload_len.max(located.payload_len);
                records.push(located);
            }
            Err(e) => {
                #[cfg(feature = "logging")]
                warn!("Scan stopped after {} records: {}", stats.records_found, e);

                error = Some(e);
            }
        }
    }

    #[cfg(feature = "logging")]
    debug!(
        "Scan complete: {} records, {} payload bytes",
        stats.records_found, stats.payload_bytes
    );

    ScanReport {
        records,
        stats,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Corruption;
    use crate::test_support::encode_stream;
    use std::io::Cursor;

    #[test]
    fn test_scan_clean_stream() {
        let data = encode_stream(&["frame 1", "frame 22", ""]);
        let report = scan_records(RecordReader::new(Cursor::new(data.clone())));

        assert!(report.is_clean());
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.records[1].offset, 23);
        assert_eq!(report.records[1].payload_len, 8);
        assert_eq!(report.stats.bytes_consumed, data.len() as u64);
        assert_eq!(report.stats.max_payload_len, 8);
        assert_eq!(report.stats.payload_bytes, 15);
    }

    #[test]
    fn test_scan_stops_at_corruption() {
        let mut data = encode_stream(&["one", "two", "three"]);
        // Payload of the second record starts at 19 + 12
        data[31] ^= 0x20;

        let report = scan_records(RecordReader::new(Cursor::new(data)));

        assert_eq!(report.records.len(), 1);
        assert!(matches!(
            report.error,
            Some(RecordError::CorruptRecord {
                ordinal: 1,
                offset: 19,
                corruption: Corruption::PayloadChecksum { .. },
            })
        ));
    }

    #[test]
    fn test_scan_empty() {
        let report = scan_records(RecordReader::new(Cursor::new(Vec::new())));

        assert!(report.is_clean());
        assert!(report.records.is_empty());
        assert_eq!(report.stats.mean_payload_len(), 0.0);
    }
}
