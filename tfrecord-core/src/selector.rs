//! Index-based record selection
//!
//! Selecting record `k` reads records `0..=k` in order, discarding all but
//! the last. There is no index and no seeking: a missing record, a truncated
//! file and a corrupt earlier record all surface as whatever error the
//! reader hit first.

use crate::error::RecordError;
use crate::reader::{ReaderOptions, RecordReader};
use crate::types::Record;
use crate::Result;
use std::io::Read;
use std::path::Path;

#[cfg(feature = "logging")]
use tracing::debug;

/// Read forward from the start of `reader` and return record `target`.
///
/// The reader must not have produced any record yet. Records after `target`
/// are left unread.
pub fn select_record<R: Read>(reader: &mut RecordReader<R>, target: u64) -> Result<Record> {
    if !reader.cursor().is_at_start() {
        return Err(RecordError::Configuration(format!(
            "record selection must start at ordinal 0, reader is at ordinal {}",
            reader.cursor().ordinal
        )));
    }

    #[cfg(feature = "logging")]
    debug!("Selecting record {}", target);

    let mut current = 0u64;
    loop {
        let record = reader.read_record()?;
        if current == target {
            #[cfg(feature = "logging")]
            debug!(
                "Selected record {} at offset {} ({} bytes)",
                record.ordinal,
                record.offset,
                record.payload.len()
            );

            return Ok(record);
        }
        current += 1;
    }
}

/// Open `path` and return the payload record at `target`.
///
/// The file is closed before this returns, on success and on error.
pub fn read_record_at<P: AsRef<Path>>(
    path: P,
    target: u64,
    options: ReaderOptions,
) -> Result<Record> {
    let mut reader = RecordReader::open(path, options)?;
    select_record(&mut reader, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Corruption;
    use crate::test_support::{encode_record, encode_stream};
    use crate::types::Cursor;
    use std::io::Cursor as IoCursor;

    #[test]
    fn test_select_first() {
        let data = encode_stream(&["A", "B", "C"]);
        let mut reader = RecordReader::new(IoCursor::new(data));

        let record = select_record(&mut reader, 0).unwrap();
        assert_eq!(record.payload.as_ref(), b"A");
        // Exactly one record consumed
        assert_eq!(reader.cursor().ordinal, 1);
    }

    #[test]
    fn test_select_last_discards_earlier() {
        let data = encode_stream(&["A", "B", "C"]);
        let mut reader = RecordReader::new(IoCursor::new(data));

        let record = select_record(&mut reader, 2).unwrap();
        assert_eq!(record.payload.as_ref(), b"C");
        assert_eq!(record.ordinal, 2);
        assert_eq!(reader.cursor().ordinal, 3);
    }

    #[test]
    fn test_records_after_target_are_not_read() {
        let data = encode_stream(&["A", "B", "C"]);
        let first_len = encode_record("A").len() as u64;
        let mut reader = RecordReader::new(IoCursor::new(data));

        select_record(&mut reader, 0).unwrap();
        assert_eq!(
            reader.cursor(),
            Cursor {
                offset: first_len,
                ordinal: 1
            }
        );
    }

    #[test]
    fn test_index_past_end() {
        let data = encode_stream(&["A", "B"]);
        let mut reader = RecordReader::new(IoCursor::new(data));

        let err = select_record(&mut reader, 5).unwrap_err();
        assert!(matches!(err, RecordError::EndOfStream { ordinal: 2, .. }));
    }

    #[test]
    fn test_empty_stream() {
        let mut reader = RecordReader::new(IoCursor::new(Vec::new()));
        assert_eq!(
            select_record(&mut reader, 0),
            Err(RecordError::EndOfStream { ordinal: 0, offset: 0 })
        );
    }

    #[test]
    fn test_corruption_before_target_propagates() {
        let mut data = encode_stream(&["A", "B", "C"]);
        // Flip a byte in A's payload
        data[12] ^= 0x80;
        let mut reader = RecordReader::new(IoCursor::new(data));

        let err = select_record(&mut reader, 2).unwrap_err();
        assert!(matches!(
            err,
            RecordError::CorruptRecord {
                ordinal: 0,
                corruption: Corruption::PayloadChecksum { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_corruption_after_target_is_ignored() {
        let mut data = encode_stream(&["A", "B"]);
        let last = data.len() - 1;
        data[last] ^= 0xff;
        let mut reader = RecordReader::new(IoCursor::new(data));

        let record = select_record(&mut reader, 0).unwrap();
        assert_eq!(record.payload.as_ref(), b"A");
    }

    #[test]
    fn test_rejects_advanced_reader() {
        let data = encode_stream(&["A", "B"]);
        let mut reader = RecordReader::new(IoCursor::new(data));
        reader.read_record().unwrap();

        assert!(matches!(
            select_record(&mut reader, 0),
            Err(RecordError::Configuration(_))
        ));
    }
}
